/// 認証機能モジュール
///
/// 認証フロー自体は外部の認証基盤が担う。このモジュールは以下のみを提供します：
/// - 認証済みユーザーを表すセッション
/// - ログインフォームの入力検証
pub mod models;
pub mod validation;

pub use models::{Credentials, CredentialsForm, Session};
pub use validation::{is_valid_email, validate_credentials};
