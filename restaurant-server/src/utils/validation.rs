//! Input validation helpers
//!
//! Text length limits and glue between `validator` derives and [`AppError`].

use validator::Validate;

use crate::utils::AppError;

/// Entity names: food, menu, category
pub const MAX_NAME_LEN: usize = 200;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Run the derived validation of a payload
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Soup", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "food_image", MAX_URL_LEN).is_ok());
        assert!(validate_optional_text(Some("a.png"), "food_image", MAX_URL_LEN).is_ok());
        let long = "x".repeat(MAX_URL_LEN + 1);
        assert!(validate_optional_text(Some(&long), "food_image", MAX_URL_LEN).is_err());
    }
}
