//! Client-side form validation.
//!
//! Credentials are checked before they leave the process so obviously
//! malformed input never becomes a network round trip. The backend remains
//! the authority; these checks only mirror its cheap structural rules.

use std::collections::BTreeMap;

use crate::models::SignupRequest;

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum number of digits in a phone number.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Maximum number of digits in a phone number (backend column width).
pub const PHONE_MAX_DIGITS: usize = 15;

/// Maximum length of a display username.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Outcome of a client-side validation pass.
///
/// `field_errors` maps field names to one display-ready message each, in
/// stable field order so error lists render deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Per-field messages; empty when the input passed
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationReport {
    /// True when no field failed.
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// All messages joined into one line, for single-slot error displays.
    pub fn summary(&self) -> String {
        self.field_errors
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn reject(&mut self, field: &str, message: impl Into<String>) {
        // First error per field wins
        self.field_errors.entry(field.to_string()).or_insert_with(|| message.into());
    }
}

/// Validate login credentials before sending them.
pub fn validate_login(phone: &str, password: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_phone(&mut report, phone);
    if password.is_empty() {
        report.reject("password", "Password is required.");
    }
    report
}

/// Validate a signup request before sending it.
pub fn validate_signup(request: &SignupRequest) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_phone(&mut report, &request.phone);
    check_new_password(&mut report, &request.password);
    if request.password != request.password_confirm {
        report.reject("password_confirm", "Password fields didn't match.");
    }
    if let Some(username) = &request.username {
        if username.trim().is_empty() {
            report.reject("username", "Username cannot be blank.");
        } else if username.chars().count() > MAX_USERNAME_LENGTH {
            report.reject(
                "username",
                format!("Username must be at most {} characters.", MAX_USERNAME_LENGTH),
            );
        }
    }
    report
}

/// True when the string is a plausible phone number: an optional leading
/// `+` followed by 10 to 15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
}

fn check_phone(report: &mut ValidationReport, phone: &str) {
    if phone.is_empty() {
        report.reject("phone", "Phone number is required.");
    } else if !is_valid_phone(phone) {
        report.reject(
            "phone",
            format!(
                "Phone number must be {} to {} digits, optionally starting with +.",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            ),
        );
    }
}

fn check_new_password(report: &mut ValidationReport, password: &str) {
    if password.is_empty() {
        report.reject("password", "Password is required.");
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        report.reject(
            "password",
            format!("Password must be at least {} characters.", MIN_PASSWORD_LENGTH),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_phone_accepts_plain_digits() {
        assert!(is_valid_phone("0700123456"));
        assert!(is_valid_phone("09123456789"));
    }

    #[test]
    fn test_is_valid_phone_accepts_plus_prefix() {
        assert!(is_valid_phone("+93700123456"));
    }

    #[test]
    fn test_is_valid_phone_rejects_wrong_lengths() {
        assert!(!is_valid_phone("070012345")); // 9 digits
        assert!(!is_valid_phone("0700123456700123")); // 16 digits
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+"));
    }

    #[test]
    fn test_is_valid_phone_rejects_non_digits() {
        assert!(!is_valid_phone("07001-23456"));
        assert!(!is_valid_phone("phone000000"));
        assert!(!is_valid_phone("07 00123456"));
    }

    #[test]
    fn test_validate_login_accepts_good_input() {
        let report = validate_login("0700123456", "secret");
        assert!(report.valid());
        assert!(report.field_errors.is_empty());
    }

    #[test]
    fn test_validate_login_rejects_empty_fields() {
        let report = validate_login("", "");
        assert!(!report.valid());
        assert!(report.field_errors.contains_key("phone"));
        assert!(report.field_errors.contains_key("password"));
    }

    #[test]
    fn test_validate_login_does_not_enforce_password_length() {
        // Existing accounts may predate the length rule; login only requires
        // the field to be present.
        let report = validate_login("0700123456", "old");
        assert!(report.valid());
    }

    #[test]
    fn test_validate_signup_accepts_good_request() {
        let request = SignupRequest::new("0700123456", "longenough", "longenough");
        assert!(validate_signup(&request).valid());
    }

    #[test]
    fn test_validate_signup_rejects_short_password() {
        let request = SignupRequest::new("0700123456", "short", "short");
        let report = validate_signup(&request);
        assert!(!report.valid());
        assert!(report.field_errors["password"].contains("at least 8"));
    }

    #[test]
    fn test_validate_signup_rejects_mismatched_confirm() {
        let request = SignupRequest::new("0700123456", "longenough", "different1");
        let report = validate_signup(&request);
        assert_eq!(
            report.field_errors.get("password_confirm").map(String::as_str),
            Some("Password fields didn't match.")
        );
    }

    #[test]
    fn test_validate_signup_rejects_blank_username() {
        let request =
            SignupRequest::new("0700123456", "longenough", "longenough").with_username("   ");
        let report = validate_signup(&request);
        assert!(report.field_errors.contains_key("username"));
    }

    #[test]
    fn test_report_summary_joins_messages_in_field_order() {
        let report = validate_login("", "");
        let summary = report.summary();
        // BTreeMap iterates alphabetically: password before phone
        assert!(summary.starts_with("Password is required."));
        assert!(summary.contains("Phone number is required."));
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut report = ValidationReport::default();
        report.reject("phone", "first");
        report.reject("phone", "second");
        assert_eq!(report.field_errors["phone"], "first");
    }
}
