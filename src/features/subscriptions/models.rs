use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 入力フォームで提示するカテゴリの候補
///
/// バリデーションでは候補外の値も受け付ける
pub const SUGGESTED_CATEGORIES: [&str; 5] = [
    "エンターテイメント",
    "音楽",
    "動画",
    "ソフトウェア",
    "その他",
];

/// 請求サイクル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// 月額
    Monthly,
    /// 年額
    Yearly,
}

impl BillingCycle {
    /// 保存時の文字列表現
    pub fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }

    /// 金額表示に付ける単位（"¥1,490/月" の "月"）
    pub fn unit_label(self) -> &'static str {
        match self {
            BillingCycle::Monthly => "月",
            BillingCycle::Yearly => "年",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 請求サイクルの解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("不明な請求サイクルです: {0}")]
pub struct ParseBillingCycleError(pub String);

impl FromStr for BillingCycle {
    type Err = ParseBillingCycleError;

    /// "monthly" または "yearly" と完全一致した場合のみ成功する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" => Ok(BillingCycle::Yearly),
            other => Err(ParseBillingCycleError(other.to_string())),
        }
    }
}

/// サブスクリプションデータモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Subscription {
    pub id: String,                   // ストアが採番するnanoId
    pub user_id: String,              // 所有ユーザー
    pub service_name: String,         // 空でないサービス名
    pub price: f64,                   // 0以上
    pub billing_cycle: BillingCycle,  // 月額 / 年額
    pub next_billing_date: NaiveDate, // 次回請求日
    pub category: String,             // 空でないカテゴリ名
    pub service_url: Option<String>,  // 絶対URL
    pub notes: Option<String>,        // メモ
    pub created_at: String,           // RFC3339形式（JST）
    pub updated_at: String,           // RFC3339形式（JST）
}

/// バリデーション済みのサブスクリプション入力
///
/// 作成・更新（全体置換）の両方でストアに渡される
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: f64,
    pub billing_cycle: BillingCycle,
    pub next_billing_date: NaiveDate,
    pub category: String,
    pub service_url: Option<String>,
    pub notes: Option<String>,
}

/// 入力フォームの生データ
///
/// 金額や日付も含め、すべて文字列のまま受け取る
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SubscriptionForm {
    pub service_name: String,
    pub price: String,
    pub billing_cycle: String,
    pub next_billing_date: String,
    pub category: String,
    pub service_url: String,
    pub notes: String,
}

impl Default for SubscriptionForm {
    /// 新規登録フォームの初期状態（請求サイクルは月額）
    fn default() -> Self {
        Self {
            service_name: String::new(),
            price: String::new(),
            billing_cycle: BillingCycle::Monthly.as_str().to_string(),
            next_billing_date: String::new(),
            category: String::new(),
            service_url: String::new(),
            notes: String::new(),
        }
    }
}

impl SubscriptionForm {
    /// 既存のサブスクリプションから編集フォームの初期値を作る
    pub fn from_subscription(subscription: &Subscription) -> Self {
        Self {
            service_name: subscription.service_name.clone(),
            price: subscription.price.to_string(),
            billing_cycle: subscription.billing_cycle.as_str().to_string(),
            next_billing_date: subscription
                .next_billing_date
                .format("%Y-%m-%d")
                .to_string(),
            category: subscription.category.clone(),
            service_url: subscription.service_url.clone().unwrap_or_default(),
            notes: subscription.notes.clone().unwrap_or_default(),
        }
    }
}
