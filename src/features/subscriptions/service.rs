//! 表示層向けのサブスクリプション操作
//!
//! 表示層が保持する唯一の状態（セッション、一覧、合計）をまとめ、
//! 一覧が変化するたびに合計を再計算する。

use super::models::{Subscription, SubscriptionForm};
use super::renewal::{days_until_renewal, is_nearing_renewal};
use super::store::SubscriptionStore;
use super::totals::{calculate_totals, format_billing_date, format_price_label, SpendTotals};
use super::validation::validate_subscription;
use crate::features::auth::Session;
use crate::shared::errors::{AppError, AppResult, ErrorSeverity};
use crate::shared::utils::today_jst;
use chrono::NaiveDate;
use serde::Serialize;

/// カード表示用の1件分の情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionCard {
    pub subscription: Subscription,
    /// 金額表記（例: ¥1,490/月）
    pub price_label: String,
    /// 次回請求日の表記（例: 2024年02月01日）
    pub next_billing_date_label: String,
    /// 次回請求日までの日数
    pub days_until_renewal: i64,
    /// 更新間近かどうか
    pub is_nearing_renewal: bool,
}

/// 一覧画面の表示内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub totals: SpendTotals,
    pub cards: Vec<SubscriptionCard>,
}

/// サブスクリプション操作サービス
pub struct SubscriptionService<S: SubscriptionStore> {
    store: S,
    session: Session,
    subscriptions: Vec<Subscription>,
    totals: SpendTotals,
}

impl<S: SubscriptionStore> SubscriptionService<S> {
    /// 空の一覧でサービスを作る（`load` で読み込む）
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            subscriptions: Vec::new(),
            totals: SpendTotals::default(),
        }
    }

    /// ストアから一覧を読み込み、合計を再計算する
    pub fn load(&mut self) -> AppResult<&[Subscription]> {
        let owner_id = self.session.owner_id()?;
        let subscriptions = self
            .store
            .list(owner_id)
            .map_err(|e| log_store_failure("サブスクリプションの取得に失敗しました", e))?;

        log::info!(
            "サブスクリプションを読み込みました: user_id={owner_id}, count={}",
            subscriptions.len()
        );
        self.replace_all(subscriptions);
        Ok(&self.subscriptions)
    }

    /// 入力を検証してサブスクリプションを登録する
    ///
    /// 検証に失敗した場合はストアを呼び出さずに `AppError::InvalidForm` を返す
    pub fn add(&mut self, form: &SubscriptionForm) -> AppResult<Subscription> {
        let owner_id = self.session.owner_id()?;
        let record = validate_subscription(form).map_err(AppError::InvalidForm)?;

        let created = self
            .store
            .insert(owner_id, &record)
            .map_err(|e| log_store_failure("サブスクリプションの登録に失敗しました", e))?;

        log::info!("サブスクリプションを登録しました: id={}", created.id);
        self.subscriptions.push(created.clone());
        self.refresh();
        Ok(created)
    }

    /// 入力を検証してサブスクリプションを更新する（全体置換）
    pub fn edit(&mut self, id: &str, form: &SubscriptionForm) -> AppResult<Subscription> {
        let owner_id = self.session.owner_id()?;
        let record = validate_subscription(form).map_err(AppError::InvalidForm)?;

        let updated = self
            .store
            .update(owner_id, id, &record)
            .map_err(|e| log_store_failure("サブスクリプションの更新に失敗しました", e))?;

        log::info!("サブスクリプションを更新しました: id={}", updated.id);
        match self.subscriptions.iter_mut().find(|s| s.id == updated.id) {
            Some(existing) => *existing = updated.clone(),
            None => self.subscriptions.push(updated.clone()),
        }
        self.refresh();
        Ok(updated)
    }

    /// サブスクリプションを削除する
    pub fn remove(&mut self, id: &str) -> AppResult<()> {
        let owner_id = self.session.owner_id()?;
        self.store
            .delete(owner_id, id)
            .map_err(|e| log_store_failure("削除に失敗しました", e))?;

        log::info!("サブスクリプションを削除しました: id={id}");
        self.subscriptions.retain(|s| s.id != id);
        self.refresh();
        Ok(())
    }

    /// 現在の一覧（次回請求日の昇順）
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// 現在の合計
    pub fn totals(&self) -> SpendTotals {
        self.totals
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 編集フォームの初期値を取得する
    pub fn edit_form(&self, id: &str) -> AppResult<SubscriptionForm> {
        self.subscriptions
            .iter()
            .find(|s| s.id == id)
            .map(SubscriptionForm::from_subscription)
            .ok_or_else(|| AppError::not_found(format!("ID {id} のサブスクリプション")))
    }

    /// 表示用のまとめを作る
    ///
    /// # 引数
    /// * `today` - 更新間近の判定基準日
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        let cards = self
            .subscriptions
            .iter()
            .map(|subscription| SubscriptionCard {
                price_label: format_price_label(subscription.price, subscription.billing_cycle),
                next_billing_date_label: format_billing_date(subscription.next_billing_date),
                days_until_renewal: days_until_renewal(subscription.next_billing_date, today),
                is_nearing_renewal: is_nearing_renewal(subscription.next_billing_date, today),
                subscription: subscription.clone(),
            })
            .collect();

        DashboardSummary {
            totals: self.totals,
            cards,
        }
    }

    /// JSTの今日を基準に表示用のまとめを作る
    pub fn summary_for_today(&self) -> DashboardSummary {
        self.summary(today_jst())
    }

    fn replace_all(&mut self, subscriptions: Vec<Subscription>) {
        self.subscriptions = subscriptions;
        self.refresh();
    }

    /// 並び順を整え、合計を再計算する
    fn refresh(&mut self) {
        // 安定ソートなので同日のレコードは既存の順序を保つ
        self.subscriptions.sort_by_key(|s| s.next_billing_date);
        self.totals = calculate_totals(&self.subscriptions);
    }
}

/// ストア操作の失敗をログに記録してそのまま返す（再試行はしない）
///
/// 未発見など重要度の低いエラーは警告として記録する
fn log_store_failure(context: &str, error: AppError) -> AppError {
    match error.severity() {
        ErrorSeverity::Low => log::warn!("{context}: {}", error.details()),
        _ => log::error!("{context}: {}", error.details()),
    }
    error
}
