//! Input validation for student and course data.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CampusError, Result};

/// Maximum allowed length for names, titles and other free text.
pub const MAX_TEXT_LENGTH: usize = 200;

/// Maximum allowed length for an entity ID.
pub const MAX_ID_LENGTH: usize = 64;

/// Characters forbidden in IDs to prevent path traversal in the document store.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0'];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validates an email address against a basic `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(CampusError::Validation("Email cannot be empty".to_string()));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(CampusError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

/// Validates a required text field (name, title, code, instructor).
pub fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CampusError::MissingField(field));
    }
    if value.len() > MAX_TEXT_LENGTH {
        return Err(CampusError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Validates an integer field that cannot be negative (age, credits).
pub fn validate_non_negative(field: &'static str, value: i32) -> Result<()> {
    if value < 0 {
        return Err(CampusError::Validation(format!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(())
}

/// Validates an entity ID before it is used to build a document path.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CampusError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(CampusError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(CampusError::Validation(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(CampusError::Validation(format!("ID cannot contain '{}'", c)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_basic_address() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("ahmed@iti.edu").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.de").is_err());
        assert!(validate_email("@b.co").is_err());
    }

    #[test]
    fn test_validate_email_empty_is_validation_error() {
        assert!(matches!(
            validate_email(""),
            Err(CampusError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_required_blank_is_missing_field() {
        assert!(matches!(
            validate_required("name", "   "),
            Err(CampusError::MissingField("name"))
        ));
        assert!(validate_required("name", "Ali Saeed").is_ok());
    }

    #[test]
    fn test_validate_required_too_long() {
        let long = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            validate_required("title", &long),
            Err(CampusError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("age", 0).is_ok());
        assert!(validate_non_negative("credits", -1).is_err());
    }

    #[test]
    fn test_validate_id_path_traversal() {
        assert!(validate_id("../../../etc/passwd").is_err());
        assert!(validate_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    }

    #[test]
    fn test_validate_id_forbidden_chars() {
        assert!(validate_id("students/1").is_err());
        assert!(validate_id("students\\1").is_err());
    }
}
