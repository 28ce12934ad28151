use serde::{Deserialize, Serialize};
use thiserror::Error;

/// フォーム入力のフィールド単位エラー
pub mod field;

pub use field::{FieldError, FieldErrors, ValidationErrorKind};

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// フォーム入力のバリデーションエラー（フィールドごと）
    #[error("入力エラー: {0}")]
    InvalidForm(FieldErrors),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// ストアに到達できない、または応答しない場合のエラー
    #[error("ストア接続エラー: {0}")]
    StoreUnavailable(String),

    /// ストアが書き込みを拒否した場合のエラー（制約違反など）
    #[error("ストア拒否エラー: {0}")]
    StoreRejected(String),

    /// 認証関連のエラー（ログインユーザーが特定できない場合など）
    #[error("認証エラー: {0}")]
    Unauthorized(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// 並行処理関連のエラー
    #[error("並行処理エラー: {0}")]
    Concurrency(String),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（ストアの一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
    /// 最重要（認証エラーなど）
    Critical,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::InvalidForm(_) => "入力内容を確認してください",
            AppError::NotFound(msg) => msg,
            AppError::StoreUnavailable(_) => "データの保存先に接続できませんでした",
            AppError::StoreRejected(_) => "データの保存が拒否されました",
            AppError::Unauthorized(_) => "ユーザー情報の取得に失敗しました",
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Concurrency(_) => "並行処理でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// エラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::InvalidForm(_) | AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::StoreUnavailable(_) | AppError::StoreRejected(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) | AppError::Concurrency(_) => ErrorSeverity::High,
            AppError::Unauthorized(_) => ErrorSeverity::Critical,
        }
    }

    /// フィールドエラーを取得（フォーム入力エラーの場合のみ）
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::InvalidForm(errors) => Some(errors),
            _ => None,
        }
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// ストア接続エラーを作成するヘルパー関数
    pub fn store_unavailable<S: Into<String>>(message: S) -> Self {
        AppError::StoreUnavailable(message.into())
    }

    /// ストア拒否エラーを作成するヘルパー関数
    pub fn store_rejected<S: Into<String>>(message: S) -> Self {
        AppError::StoreRejected(message.into())
    }

    /// 認証エラーを作成するヘルパー関数
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        AppError::Unauthorized(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// 並行処理エラーを作成するヘルパー関数
    pub fn concurrency<S: Into<String>>(message: S) -> Self {
        AppError::Concurrency(message.into())
    }
}

/// AppErrorからStringへの変換（表示層での使用のため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message().to_string()
    }
}

/// rusqlite::ErrorからAppErrorへの変換
///
/// 制約違反は拒否、行なしは未発見、それ以外は接続不可として扱う
impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => AppError::NotFound(error.to_string()),
            rusqlite::Error::SqliteFailure(ref failure, _)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AppError::StoreRejected(error.to_string())
            }
            _ => AppError::StoreUnavailable(error.to_string()),
        }
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
