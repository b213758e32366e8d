//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., phone number)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value could not be read as a whole number
    NotAnInteger { field: &'static str, value: String },

    /// Number is zero or negative
    NotPositive { field: &'static str, value: i64 },

    /// Date-time could not be parsed
    InvalidDate { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::NotAnInteger { field, value } => {
                write!(f, "{} must be a whole number, got '{}'", field, value)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            Self::InvalidDate { value } => write!(f, "invalid date format: '{}'", value),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim optional free text, mapping blank input to `None`.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(Some(trimmed.to_owned()))
}
