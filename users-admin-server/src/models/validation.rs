//! Validation error types

use std::fmt;

/// Validation error for client input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the expected format (e.g., non-numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be parsed
    MalformedBody { reason: String },

    /// Update body names no field to change
    NoChanges,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MalformedBody { reason } => write!(f, "malformed request body: {}", reason),
            Self::NoChanges => write!(f, "update body must set at least one field"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "email",
            max: 256,
        };
        assert_eq!(
            err.to_string(),
            "email exceeds maximum length of 256 characters"
        );

        let err = ValidationError::InvalidFormat {
            field: "userid",
            reason: "must be an integer",
        };
        assert_eq!(err.to_string(), "userid: must be an integer");
    }
}
