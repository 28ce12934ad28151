/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプション管理に関連するすべての機能を提供します：
/// - 入力フォームの検証と型付きレコードへの変換
/// - 月額・年額合計の計算
/// - 更新間近の判定と表示用の整形
/// - サブスクリプションの作成、読み取り、更新、削除
pub mod models;
pub mod renewal;
pub mod repository;
pub mod service;
pub mod store;
pub mod totals;
pub mod validation;


// 公開インターフェース
pub use models::{
    BillingCycle, NewSubscription, Subscription, SubscriptionForm, SUGGESTED_CATEGORIES,
};

pub use renewal::{days_until_renewal, is_nearing_renewal, RENEWAL_WARNING_DAYS};

pub use repository::SqliteSubscriptionStore;

pub use service::{DashboardSummary, SubscriptionCard, SubscriptionService};

pub use store::SubscriptionStore;

pub use totals::{
    calculate_totals, format_billing_date, format_price_label, format_yen, round_for_display,
    SpendTotals,
};

pub use validation::{validate_subscription, FieldName};
