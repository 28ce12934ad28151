use crate::shared::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

/// データベースファイルを開き、テーブルを作成する
///
/// # 引数
/// * `database_path` - データベースファイルのパス
///
/// # 戻り値
/// データベース接続、または失敗時はエラー
pub fn open_database(database_path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(database_path)?;
    create_tables(&conn)?;

    log::info!("データベースを初期化しました: {database_path:?}");

    Ok(conn)
}

/// メモリ上のデータベースを開き、テーブルを作成する
pub fn open_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

/// データベーステーブルを作成する
///
/// 既存のテーブルがある場合は何もしない
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    create_subscriptions_table(conn)?;
    create_indexes(conn)?;
    Ok(())
}

/// サブスクリプションテーブルを作成する
fn create_subscriptions_table(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS subscriptions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            service_name TEXT NOT NULL CHECK(length(trim(service_name)) > 0),
            price REAL NOT NULL CHECK(price >= 0),
            billing_cycle TEXT NOT NULL CHECK(billing_cycle IN ('monthly', 'yearly')),
            next_billing_date TEXT NOT NULL,
            category TEXT NOT NULL CHECK(length(trim(category)) > 0),
            service_url TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// インデックスを作成する
fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_subscriptions_user_billing_date
         ON subscriptions(user_id, next_billing_date)",
        [],
    )?;

    Ok(())
}
