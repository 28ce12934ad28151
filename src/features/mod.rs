/// 認証機能
pub mod auth;

/// サブスクリプション管理機能
pub mod subscriptions;
