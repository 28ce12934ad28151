/// ID生成ユーティリティ
pub mod nanoid;

use chrono::Utc;
use chrono_tz::Asia::Tokyo;

pub use self::nanoid::{generate_id, is_valid_nanoid};

/// JSTの現在時刻をRFC3339形式で取得する
pub fn now_jst_rfc3339() -> String {
    Utc::now().with_timezone(&Tokyo).to_rfc3339()
}

/// JSTの今日の日付を取得する
pub fn today_jst() -> chrono::NaiveDate {
    Utc::now().with_timezone(&Tokyo).date_naive()
}
