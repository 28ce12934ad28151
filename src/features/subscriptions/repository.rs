use super::models::{BillingCycle, NewSubscription, Subscription};
use super::store::SubscriptionStore;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{generate_id, now_jst_rfc3339};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::sync::{Mutex, MutexGuard};

/// 日付カラムの保存形式
const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = "SELECT id, user_id, service_name, price, billing_cycle,
            next_billing_date, category, service_url, notes, created_at, updated_at
     FROM subscriptions";

/// 行をサブスクリプションに変換する
fn map_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let billing_cycle: String = row.get(4)?;
    let billing_cycle = billing_cycle
        .parse::<BillingCycle>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    let next_billing_date: String = row.get(5)?;
    let next_billing_date = NaiveDate::parse_from_str(&next_billing_date, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Subscription {
        id: row.get(0)?,
        user_id: row.get(1)?,
        service_name: row.get(2)?,
        price: row.get(3)?,
        billing_cycle,
        next_billing_date,
        category: row.get(6)?,
        service_url: row.get(7)?,
        notes: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn not_found(id: &str) -> AppError {
    AppError::not_found(format!("ID {id} のサブスクリプション"))
}

/// サブスクリプションを作成する
///
/// # 引数
/// * `conn` - データベース接続
/// * `record` - バリデーション済みの入力
/// * `user_id` - 所有ユーザーID
///
/// # 戻り値
/// 作成されたサブスクリプション、または失敗時はエラー
pub fn create(
    conn: &Connection,
    record: &NewSubscription,
    user_id: &str,
) -> AppResult<Subscription> {
    let id = generate_id();
    let now = now_jst_rfc3339();

    conn.execute(
        "INSERT INTO subscriptions (id, user_id, service_name, price, billing_cycle,
             next_billing_date, category, service_url, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            id,
            user_id,
            record.service_name,
            record.price,
            record.billing_cycle.as_str(),
            record.next_billing_date.format(DATE_FORMAT).to_string(),
            record.category,
            record.service_url,
            record.notes,
            now,
            now
        ],
    )?;

    log::debug!("サブスクリプションを作成しました: id={id}");
    find_by_id(conn, &id, user_id)
}

/// IDでサブスクリプションを取得する
pub fn find_by_id(conn: &Connection, id: &str, user_id: &str) -> AppResult<Subscription> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1 AND user_id = ?2"),
        params![id, user_id],
        map_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => not_found(id),
        _ => AppError::from(e),
    })
}

/// サブスクリプション一覧を取得する（次回請求日の昇順）
pub fn find_all(conn: &Connection, user_id: &str) -> AppResult<Vec<Subscription>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY next_billing_date ASC, created_at ASC"
    ))?;
    let subscriptions = stmt.query_map([user_id], map_row)?;

    subscriptions
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::from)
}

/// サブスクリプションを更新する（全体置換）
///
/// IDと所有ユーザー、作成日時は変更しない
pub fn update(
    conn: &Connection,
    id: &str,
    record: &NewSubscription,
    user_id: &str,
) -> AppResult<Subscription> {
    let now = now_jst_rfc3339();

    let rows_affected = conn.execute(
        "UPDATE subscriptions
         SET service_name = ?1, price = ?2, billing_cycle = ?3, next_billing_date = ?4,
             category = ?5, service_url = ?6, notes = ?7, updated_at = ?8
         WHERE id = ?9 AND user_id = ?10",
        params![
            record.service_name,
            record.price,
            record.billing_cycle.as_str(),
            record.next_billing_date.format(DATE_FORMAT).to_string(),
            record.category,
            record.service_url,
            record.notes,
            now,
            id,
            user_id
        ],
    )?;

    if rows_affected == 0 {
        return Err(not_found(id));
    }

    log::debug!("サブスクリプションを更新しました: id={id}");
    find_by_id(conn, id, user_id)
}

/// サブスクリプションを削除する
pub fn delete(conn: &Connection, id: &str, user_id: &str) -> AppResult<()> {
    let rows_affected = conn.execute(
        "DELETE FROM subscriptions WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;

    if rows_affected == 0 {
        return Err(not_found(id));
    }

    log::debug!("サブスクリプションを削除しました: id={id}");
    Ok(())
}

/// SQLiteをバックエンドとするサブスクリプションストア
pub struct SqliteSubscriptionStore {
    conn: Mutex<Connection>,
}

impl SqliteSubscriptionStore {
    /// スキーマ作成済みの接続からストアを作る
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| AppError::concurrency(format!("データベースロックエラー: {e}")))
    }
}

impl SubscriptionStore for SqliteSubscriptionStore {
    fn list(&self, owner_id: &str) -> AppResult<Vec<Subscription>> {
        let conn = self.lock()?;
        find_all(&conn, owner_id)
    }

    fn insert(&self, owner_id: &str, record: &NewSubscription) -> AppResult<Subscription> {
        let conn = self.lock()?;
        create(&conn, record, owner_id)
    }

    fn update(
        &self,
        owner_id: &str,
        id: &str,
        record: &NewSubscription,
    ) -> AppResult<Subscription> {
        let conn = self.lock()?;
        update(&conn, id, record, owner_id)
    }

    fn delete(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let conn = self.lock()?;
        delete(&conn, id, owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::open_in_memory;
    use crate::shared::utils::is_valid_nanoid;

    fn create_test_db() -> Connection {
        open_in_memory().unwrap()
    }

    fn record(name: &str, price: f64, cycle: BillingCycle, date: &str) -> NewSubscription {
        NewSubscription {
            service_name: name.to_string(),
            price,
            billing_cycle: cycle,
            next_billing_date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            category: "動画".to_string(),
            service_url: None,
            notes: None,
        }
    }

    #[test]
    fn test_subscription_crud_operations() {
        let conn = create_test_db();
        let user_id = "user-1";

        // 作成
        let input = NewSubscription {
            service_url: Some("https://www.netflix.com".to_string()),
            notes: Some("家族プラン".to_string()),
            ..record("Netflix", 1490.0, BillingCycle::Monthly, "2024-02-01")
        };
        let created = create(&conn, &input, user_id).unwrap();
        assert!(is_valid_nanoid(&created.id));
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.service_name, "Netflix");
        assert_eq!(created.price, 1490.0);
        assert_eq!(
            created.service_url.as_deref(),
            Some("https://www.netflix.com")
        );
        assert_eq!(created.created_at, created.updated_at);

        // 取得
        let found = find_by_id(&conn, &created.id, user_id).unwrap();
        assert_eq!(found, created);

        // 更新（全体置換: 省略したフィールドは消える）
        let replacement = record("Netflix 4K", 1980.0, BillingCycle::Yearly, "2024-03-01");
        let updated = update(&conn, &created.id, &replacement, user_id).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.service_name, "Netflix 4K");
        assert_eq!(updated.billing_cycle, BillingCycle::Yearly);
        assert_eq!(updated.service_url, None);
        assert_eq!(updated.notes, None);
        assert_eq!(updated.created_at, created.created_at);

        // 削除
        delete(&conn, &created.id, user_id).unwrap();
        assert!(matches!(
            find_by_id(&conn, &created.id, user_id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_all_orders_by_next_billing_date() {
        let conn = create_test_db();
        let user_id = "user-1";

        let entries = [
            ("C", "2024-03-01"),
            ("A", "2024-01-15"),
            ("B", "2024-02-10"),
        ];
        for (name, date) in entries {
            let input = record(name, 1.0, BillingCycle::Monthly, date);
            create(&conn, &input, user_id).unwrap();
        }

        let names: Vec<String> = find_all(&conn, user_id)
            .unwrap()
            .into_iter()
            .map(|s| s.service_name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_owner_isolation() {
        let conn = create_test_db();

        let mine = record("Mine", 100.0, BillingCycle::Monthly, "2024-01-01");
        let theirs = record("Theirs", 100.0, BillingCycle::Monthly, "2024-01-01");
        let mine = create(&conn, &mine, "alice").unwrap();
        create(&conn, &theirs, "bob").unwrap();

        assert_eq!(find_all(&conn, "alice").unwrap().len(), 1);
        assert!(matches!(
            find_by_id(&conn, &mine.id, "bob"),
            Err(AppError::NotFound(_))
        ));

        // 他ユーザーのレコードは更新も削除もできない
        let replacement = record("Hijack", 0.0, BillingCycle::Monthly, "2024-01-01");
        assert!(matches!(
            update(&conn, &mine.id, &replacement, "bob"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete(&conn, &mine.id, "bob"),
            Err(AppError::NotFound(_))
        ));
        let kept = find_by_id(&conn, &mine.id, "alice").unwrap();
        assert_eq!(kept.service_name, "Mine");
    }

    #[test]
    fn test_delete_unknown_id() {
        let conn = create_test_db();
        let result = delete(&conn, "missing", "user-1");
        let error = result.unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
        assert_eq!(
            error.user_message(),
            "ID missing のサブスクリプションが見つかりません"
        );
    }

    #[test]
    fn test_negative_price_is_rejected_by_store() {
        let conn = create_test_db();
        let invalid = record("Broken", -1.0, BillingCycle::Monthly, "2024-01-01");

        let result = create(&conn, &invalid, "user-1");
        assert!(matches!(result, Err(AppError::StoreRejected(_))));
    }

    #[test]
    fn test_sqlite_store_trait_methods() {
        let store = SqliteSubscriptionStore::new(create_test_db());

        let input = record("Spotify", 980.0, BillingCycle::Monthly, "2024-01-10");
        let created = store.insert("user-1", &input).unwrap();
        assert_eq!(store.list("user-1").unwrap().len(), 1);

        let updated = store
            .update(
                "user-1",
                &created.id,
                &record("Spotify Duo", 1280.0, BillingCycle::Monthly, "2024-01-10"),
            )
            .unwrap();
        assert_eq!(updated.price, 1280.0);

        store.delete("user-1", &created.id).unwrap();
        assert!(store.list("user-1").unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_store_is_owner_scoped() {
        let store = SqliteSubscriptionStore::new(create_test_db());
        let input = record("Netflix", 1490.0, BillingCycle::Monthly, "2024-02-01");
        let created = store.insert("alice", &input).unwrap();

        assert!(store.list("bob").unwrap().is_empty());
        assert!(matches!(
            store.update("bob", &created.id, &input),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("bob", &created.id),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(store.list("alice").unwrap().len(), 1);
    }
}
