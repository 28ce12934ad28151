use chrono::NaiveDate;

/// 更新間近と判定する日数
pub const RENEWAL_WARNING_DAYS: i64 = 7;

/// 次回請求日までの日数（過去の場合は負の値）
pub fn days_until_renewal(next_billing_date: NaiveDate, today: NaiveDate) -> i64 {
    (next_billing_date - today).num_days()
}

/// 更新間近かどうか
///
/// 次回請求日まで7日未満であればtrue。請求日を過ぎている場合もtrue
pub fn is_nearing_renewal(next_billing_date: NaiveDate, today: NaiveDate) -> bool {
    days_until_renewal(next_billing_date, today) < RENEWAL_WARNING_DAYS
}
