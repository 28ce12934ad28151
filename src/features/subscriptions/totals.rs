//! 月額・年額の合計計算
//!
//! 月額と年額のサブスクリプションを共通の基準に換算して合計する。
//! 丸めは表示側の責務で、ここでは行わない。

use super::models::{BillingCycle, Subscription};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 1年あたりの月数
const MONTHS_PER_YEAR: f64 = 12.0;

/// 支出の合計
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendTotals {
    /// 月額換算の合計
    pub total_monthly: f64,
    /// 年額換算の合計
    pub total_yearly: f64,
}

/// 1件分の月額換算
pub fn monthly_equivalent(price: f64, billing_cycle: BillingCycle) -> f64 {
    match billing_cycle {
        BillingCycle::Monthly => price,
        BillingCycle::Yearly => price / MONTHS_PER_YEAR,
    }
}

/// 1件分の年額換算
pub fn yearly_equivalent(price: f64, billing_cycle: BillingCycle) -> f64 {
    match billing_cycle {
        BillingCycle::Monthly => price * MONTHS_PER_YEAR,
        BillingCycle::Yearly => price,
    }
}

/// サブスクリプション一覧から月額・年額の合計を計算する
///
/// # 引数
/// * `subscriptions` - サブスクリプション一覧（順序は結果に影響しない）
///
/// # 戻り値
/// 月額・年額の合計。空の一覧の場合は両方0
pub fn calculate_totals(subscriptions: &[Subscription]) -> SpendTotals {
    subscriptions
        .iter()
        .fold(SpendTotals::default(), |acc, sub| SpendTotals {
            total_monthly: acc.total_monthly + monthly_equivalent(sub.price, sub.billing_cycle),
            total_yearly: acc.total_yearly + yearly_equivalent(sub.price, sub.billing_cycle),
        })
}

/// 表示用に整数へ丸める（0.5は0から遠い方へ）
pub fn round_for_display(amount: f64) -> i64 {
    amount.round() as i64
}

/// 円表記の文字列に整形する（例: ¥1,234）
pub fn format_yen(amount: f64) -> String {
    let rounded = round_for_display(amount);
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

/// 請求サイクル付きの金額表記に整形する（例: ¥1,490/月）
pub fn format_price_label(price: f64, billing_cycle: BillingCycle) -> String {
    format!("{}/{}", format_yen(price), billing_cycle.unit_label())
}

/// 次回請求日を表示用に整形する（例: 2024年02月01日）
pub fn format_billing_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}
