use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 認証済みユーザーのセッション情報
///
/// 認証基盤から受け取り、所有ユーザーを必要とする操作に明示的に渡す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// ユーザーID（サブスクリプションの所有者）
    pub user_id: String,
    /// メールアドレス
    pub email: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }

    /// 所有ユーザーIDを取得する
    ///
    /// ユーザーIDが空のセッションは未認証として扱う
    pub fn owner_id(&self) -> AppResult<&str> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::unauthorized("ユーザーIDが空のセッションです"));
        }
        Ok(&self.user_id)
    }
}

/// ログインフォームの生データ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// 検証済みの認証情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
