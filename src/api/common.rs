//! Presence checks shared by the handlers
//!
//! A required field counts as present when it is non-null, and for text also
//! non-empty, and for ids non-zero. Whitespace-only text is present.

use super::error::ApiError;
use crate::services::MISSING_FIELDS_MSG;

/// Keep a text field only if it is non-empty
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Keep an id only if it is non-zero
pub fn present_id(value: Option<i64>) -> Option<i64> {
    value.filter(|&id| id != 0)
}

/// The 400 returned when a required field is missing
pub fn missing_fields() -> ApiError {
    ApiError::validation_error(MISSING_FIELDS_MSG)
}
