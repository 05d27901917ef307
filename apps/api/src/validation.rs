//! Input limits shared by every handler. Lengths are counted in characters, not bytes.

use crate::errors::AppError;

pub const MAX_MESSAGE_LENGTH: usize = 2000;
pub const MAX_NOTE_LENGTH: usize = 1000;
pub const MAX_CUSTOMER_NAME_LENGTH: usize = 100;
pub const MAX_COMPANY_NAME_LENGTH: usize = 200;
pub const MAX_WHAT_HAPPENED_LENGTH: usize = 1000;

/// Trims `value` and rejects it when blank.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Trimmed, non-empty customer name within the length limit.
pub fn customer_name(value: &str) -> Result<&str, AppError> {
    let name = require_text("customer_name", value)?;
    max_chars("customer_name", name, MAX_CUSTOMER_NAME_LENGTH)?;
    Ok(name)
}

/// Ratings and tone preference scores share the 1–5 scale.
pub fn score_1_to_5(field: &str, value: i16) -> Result<i16, AppError> {
    if !(1..=5).contains(&value) {
        return Err(AppError::Validation(format!(
            "{field} must be between 1 and 5"
        )));
    }
    Ok(value)
}
