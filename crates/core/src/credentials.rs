//! Input checks for credential-bearing requests.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Return the trimmed value of a required request field.
///
/// A missing field and a blank one are treated the same way.
pub fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Return a required secret (password) without trimming it.
///
/// Whitespace is significant in passwords, so only a missing or empty
/// value is rejected.
pub fn require_secret<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, CoreError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Check that an email address is syntactically valid.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.to_owned().validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}
