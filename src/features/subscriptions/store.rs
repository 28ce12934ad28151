use super::models::{NewSubscription, Subscription};
use crate::shared::errors::AppResult;

/// サブスクリプションの保存先
///
/// すべての操作は所有ユーザーの範囲に限定される。他のユーザーのレコードは
/// 存在しないものとして扱う。失敗時の再試行は行わない。
pub trait SubscriptionStore {
    /// 所有ユーザーのサブスクリプション一覧を次回請求日の昇順で取得する
    fn list(&self, owner_id: &str) -> AppResult<Vec<Subscription>>;

    /// サブスクリプションを作成する（IDとタイムスタンプはストアが採番する）
    fn insert(&self, owner_id: &str, record: &NewSubscription) -> AppResult<Subscription>;

    /// サブスクリプション全体を置き換える
    ///
    /// 存在しないIDの場合は `AppError::NotFound`
    fn update(&self, owner_id: &str, id: &str, record: &NewSubscription)
        -> AppResult<Subscription>;

    /// サブスクリプションを削除する
    ///
    /// 存在しないIDの場合は `AppError::NotFound`
    fn delete(&self, owner_id: &str, id: &str) -> AppResult<()>;
}
