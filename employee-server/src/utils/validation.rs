//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person and company names
pub const MAX_NAME_LEN: usize = 200;

/// Gender labels
pub const MAX_GENDER_LEN: usize = 32;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Phone numbers, including separators
pub const MIN_PHONE_LEN: usize = 7;
pub const MAX_PHONE_LEN: usize = 20;

/// Employable age range
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

// ── Field validators ────────────────────────────────────────────────

pub fn validate_age(age: u32) -> Result<(), AppError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::validation(format!(
            "age must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    Ok(())
}

/// Digits plus the usual separators; at least [`MIN_PHONE_LEN`] digits.
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    let phone = phone.trim();
    let len = phone.chars().count();
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "phone must be {MIN_PHONE_LEN}-{MAX_PHONE_LEN} characters"
        )));
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(AppError::validation("phone contains invalid characters"));
    }
    if phone.chars().filter(|c| c.is_ascii_digit()).count() < MIN_PHONE_LEN {
        return Err(AppError::validation(format!(
            "phone must contain at least {MIN_PHONE_LEN} digits"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation(format!(
            "email is too long (max {MAX_EMAIL_LEN})"
        )));
    }
    if !email.validate_email() {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "password must be {MIN_PASSWORD_LEN}-{MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_salary(salary: f64) -> Result<(), AppError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(AppError::validation(
            "salary must be a non-negative number",
        ));
    }
    Ok(())
}

/// Emails are compared case-insensitively; store them in one canonical form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parse a public employee identifier: six ASCII digits, no leading zero.
pub fn parse_employee_id(raw: &str) -> Result<u32, AppError> {
    let valid = raw.len() == 6
        && raw.bytes().all(|b| b.is_ascii_digit())
        && !raw.starts_with('0');
    if !valid {
        return Err(AppError::validation(format!(
            "Invalid employee id '{raw}': expected a 6-digit number"
        )));
    }
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid employee id '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_format() {
        assert_eq!(parse_employee_id("123456").unwrap(), 123456);
        assert!(parse_employee_id("012345").is_err());
        assert!(parse_employee_id("12345").is_err());
        assert!(parse_employee_id("1234567").is_err());
        assert!(parse_employee_id("12a456").is_err());
        assert!(parse_employee_id("+12345").is_err());
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
        assert!(validate_phone("+ - ( ) 12").is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("asha@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert_eq!(normalize_email("  Asha@Example.COM "), "asha@example.com");
    }

    #[test]
    fn numeric_ranges() {
        assert!(validate_age(18).is_ok());
        assert!(validate_age(100).is_ok());
        assert!(validate_age(17).is_err());
        assert!(validate_salary(0.0).is_ok());
        assert!(validate_salary(-1.0).is_err());
        assert!(validate_salary(f64::NAN).is_err());
    }

    #[test]
    fn text_limits() {
        assert!(validate_required_text("  ", "fullName", 10).is_err());
        assert!(validate_required_text("abc", "fullName", 2).is_err());
        assert!(validate_optional_text(&None, "location", 1).is_ok());
        assert!(validate_optional_text(&Some("abc".into()), "location", 2).is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }
}
