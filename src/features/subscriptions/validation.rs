//! サブスクリプション入力フォームのバリデーション
//!
//! 文字列のままの入力を検証し、型付きの `NewSubscription` に変換する。
//! すべてのフィールドを個別に評価し、違反はまとめて返す。

use super::models::{BillingCycle, NewSubscription, SubscriptionForm};
use crate::shared::errors::{FieldErrors, ValidationErrorKind};
use chrono::NaiveDate;
use url::Url;

/// フォームのフィールド名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    ServiceName,
    Price,
    BillingCycle,
    NextBillingDate,
    Category,
    ServiceUrl,
    Notes,
}

impl FieldName {
    /// エラーマップで使用するキー
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::ServiceName => "service_name",
            FieldName::Price => "price",
            FieldName::BillingCycle => "billing_cycle",
            FieldName::NextBillingDate => "next_billing_date",
            FieldName::Category => "category",
            FieldName::ServiceUrl => "service_url",
            FieldName::Notes => "notes",
        }
    }
}

/// サブスクリプション入力を検証する
///
/// # 引数
/// * `form` - 入力フォームの生データ
///
/// # 戻り値
/// 正規化されたサブスクリプション、または違反したフィールドごとのエラー
pub fn validate_subscription(form: &SubscriptionForm) -> Result<NewSubscription, FieldErrors> {
    let mut errors = FieldErrors::new();

    let service_name = required_text(&form.service_name, FieldName::ServiceName, &mut errors);
    let price = record(parse_price(&form.price), FieldName::Price, &mut errors);
    let billing_cycle = record(
        parse_billing_cycle(&form.billing_cycle),
        FieldName::BillingCycle,
        &mut errors,
    );
    let next_billing_date = record(
        parse_billing_date(&form.next_billing_date),
        FieldName::NextBillingDate,
        &mut errors,
    );
    let category = required_text(&form.category, FieldName::Category, &mut errors);
    let service_url = record(
        parse_service_url(&form.service_url),
        FieldName::ServiceUrl,
        &mut errors,
    );
    let notes = optional_text(&form.notes);

    match (
        service_name,
        price,
        billing_cycle,
        next_billing_date,
        category,
        service_url,
    ) {
        (
            Some(service_name),
            Some(price),
            Some(billing_cycle),
            Some(next_billing_date),
            Some(category),
            Some(service_url),
        ) if errors.is_empty() => Ok(NewSubscription {
            service_name,
            price,
            billing_cycle,
            next_billing_date,
            category,
            service_url,
            notes,
        }),
        _ => Err(errors),
    }
}

/// 結果をエラーマップに記録し、成功値のみを返す
fn record<T>(
    result: Result<T, ValidationErrorKind>,
    field: FieldName,
    errors: &mut FieldErrors,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(kind) => {
            errors.insert(field.as_str(), kind);
            None
        }
    }
}

/// 必須テキスト（前後の空白を除いて空でないこと）
fn required_text(raw: &str, field: FieldName, errors: &mut FieldErrors) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert(field.as_str(), ValidationErrorKind::RequiredFieldMissing);
        return None;
    }
    Some(trimmed.to_string())
}

/// 任意テキスト（空文字のみ未設定として扱い、それ以外はそのまま保持する）
fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// 金額を解析する（有限かつ0以上の数値）
pub fn parse_price(raw: &str) -> Result<f64, ValidationErrorKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationErrorKind::RequiredFieldMissing);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationErrorKind::InvalidNumber),
    }
}

/// 請求サイクルを解析する（"monthly" / "yearly" と完全一致）
pub fn parse_billing_cycle(raw: &str) -> Result<BillingCycle, ValidationErrorKind> {
    raw.parse::<BillingCycle>()
        .map_err(|_| ValidationErrorKind::InvalidEnum)
}

/// 次回請求日を解析する（YYYY-MM-DD形式）
///
/// 過去の日付も受け付ける
pub fn parse_billing_date(raw: &str) -> Result<NaiveDate, ValidationErrorKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationErrorKind::RequiredFieldMissing);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationErrorKind::InvalidDate)
}

/// サービスURLを解析する
///
/// 空文字のみ未設定として扱う。空白だけの入力を含め、それ以外は絶対URLでなければならない
pub fn parse_service_url(raw: &str) -> Result<Option<String>, ValidationErrorKind> {
    if raw.is_empty() {
        return Ok(None);
    }

    // 空白だけの入力は空のURLとして解析され、InvalidUrlになる
    let trimmed = raw.trim();
    Url::parse(trimmed)
        .map(|_| Some(trimmed.to_string()))
        .map_err(|_| ValidationErrorKind::InvalidUrl)
}
