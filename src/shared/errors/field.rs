use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// フィールド単位のバリデーションエラーの種類
///
/// サブスクリプション入力の基本分類は `RequiredFieldMissing`、`InvalidNumber`、
/// `InvalidEnum`、`InvalidUrl` の4種類。
/// `InvalidDate` は次回請求日を日付型で保持するための追加分類で、
/// `InvalidEmail` と `PasswordTooShort` はログインフォーム専用の分類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// 必須項目が未入力
    RequiredFieldMissing,
    /// 数値として解釈できない、または負の値
    InvalidNumber,
    /// 許可された選択肢以外の値
    InvalidEnum,
    /// YYYY-MM-DD形式の日付として解釈できない（基本分類外の追加分類）
    InvalidDate,
    /// 絶対URLとして解釈できない
    InvalidUrl,
    /// メールアドレスとして解釈できない（ログインフォーム専用）
    InvalidEmail,
    /// パスワードが最小文字数に満たない（ログインフォーム専用）
    PasswordTooShort,
}

impl ValidationErrorKind {
    /// 種類ごとの既定メッセージ
    pub fn default_message(self) -> &'static str {
        match self {
            ValidationErrorKind::RequiredFieldMissing => "必須項目です",
            ValidationErrorKind::InvalidNumber => "0以上の数値を入力してください",
            ValidationErrorKind::InvalidEnum => "請求サイクルを選択してください",
            ValidationErrorKind::InvalidDate => "日付はYYYY-MM-DD形式で入力してください",
            ValidationErrorKind::InvalidUrl => "有効なURLを入力してください",
            ValidationErrorKind::InvalidEmail => "有効なメールアドレスを入力してください",
            ValidationErrorKind::PasswordTooShort => "パスワードは6文字以上で入力してください",
        }
    }
}

/// 1フィールド分のエラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// フィールド名 → エラーのマップ
///
/// フィールドごとに最大1件のエラーを保持する。
/// 種類の一覧と基本分類の範囲は [`ValidationErrorKind`] を参照。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 種類ごとの既定メッセージでエラーを登録する
    pub fn insert(&mut self, field: &'static str, kind: ValidationErrorKind) {
        self.0.insert(
            field,
            FieldError {
                kind,
                message: kind.default_message().to_string(),
            },
        );
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// 指定フィールドのエラー種類を取得
    pub fn kind_of(&self, field: &str) -> Option<ValidationErrorKind> {
        self.0.get(field).map(|e| e.kind)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// エラーがなければOk、あればErrに変換する
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {}", error.message)?;
            first = false;
        }
        Ok(())
    }
}
