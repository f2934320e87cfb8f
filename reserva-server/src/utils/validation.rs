//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SurrealDB does not enforce string lengths, so limits are applied here
//! before anything reaches the stores.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: user display names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an email address: required, bounded, and structurally plausible.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation("email must contain '@'".to_string()));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(AppError::validation("email is malformed".to_string()));
    }
    Ok(())
}

/// Validate that an integer field is strictly positive.
pub fn validate_positive(value: i32, field: &str) -> Result<(), AppError> {
    if value < 1 {
        return Err(AppError::validation(format!("{field} must be positive")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_overlong_text() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@nolocal.com").is_err());
        assert!(validate_email("diner@example.com").is_ok());
    }

    #[test]
    fn rejects_non_positive_numbers() {
        assert!(validate_positive(0, "capacity").is_err());
        assert!(validate_positive(-3, "capacity").is_err());
        assert!(validate_positive(1, "capacity").is_ok());
    }
}
