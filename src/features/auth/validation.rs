use super::models::{Credentials, CredentialsForm};
use crate::shared::errors::{FieldErrors, ValidationErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// パスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// メールアドレスの簡易形式チェック
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("メールアドレスの正規表現が不正です")
});

/// メールアドレスとして妥当な形式かどうか
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// ログインフォームを検証する
///
/// # 検証規則
/// - メールアドレス: 必須、かつ形式が正しいこと
/// - パスワード: 6文字以上
pub fn validate_credentials(form: &CredentialsForm) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = form.email.trim();

    if email.is_empty() {
        errors.insert("email", ValidationErrorKind::RequiredFieldMissing);
    } else if !is_valid_email(email) {
        errors.insert("email", ValidationErrorKind::InvalidEmail);
    }

    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert("password", ValidationErrorKind::PasswordTooShort);
    }

    errors.into_result(Credentials {
        email: email.to_string(),
        password: form.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str) -> CredentialsForm {
        CredentialsForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_credentials() {
        let credentials = validate_credentials(&form(" user@example.com ", "secret1")).unwrap();
        assert_eq!(credentials.email, "user@example.com");
        assert_eq!(credentials.password, "secret1");
    }

    #[test]
    fn test_missing_email() {
        let errors = validate_credentials(&form("", "secret1")).unwrap_err();
        assert_eq!(
            errors.kind_of("email"),
            Some(ValidationErrorKind::RequiredFieldMissing)
        );
        assert!(!errors.contains("password"));
    }

    #[test]
    fn test_malformed_email() {
        let malformed = [
            "user",
            "user@",
            "@example.com",
            "user@example",
            "a b@example.com",
        ];
        for email in malformed {
            let errors = validate_credentials(&form(email, "secret1")).unwrap_err();
            assert_eq!(
                errors.kind_of("email"),
                Some(ValidationErrorKind::InvalidEmail),
                "{email} が受け付けられています"
            );
        }
    }

    #[test]
    fn test_short_password() {
        let errors = validate_credentials(&form("user@example.com", "12345")).unwrap_err();
        assert_eq!(
            errors.get("password").unwrap().message,
            "パスワードは6文字以上で入力してください"
        );
        assert_eq!(
            errors.kind_of("password"),
            Some(ValidationErrorKind::PasswordTooShort)
        );
    }

    #[test]
    fn test_short_password_message_matches_minimum_length() {
        let message = ValidationErrorKind::PasswordTooShort.default_message();
        assert!(message.contains(&MIN_PASSWORD_LENGTH.to_string()));
    }

    #[test]
    fn test_password_length_counts_characters() {
        // マルチバイト文字も1文字として数える
        let result = validate_credentials(&form("user@example.com", "あいうえおか"));
        assert!(result.is_ok());
    }
}
