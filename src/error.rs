//! Error types for lanewise operations.
//!
//! The numeric kernels themselves are total functions and never fail; errors
//! exist only at the API boundary (slice length mismatches, out-of-range
//! distribution parameters, bad allocation layouts).

use std::fmt;

/// Errors that can occur at the lanewise API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid layout parameters were provided for an aligned allocation.
    LayoutError {
        /// The size parameter that caused the error.
        size: usize,
        /// The alignment parameter that caused the error.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LayoutError {
                size,
                alignment,
                message,
            } => write!(
                f,
                "Invalid memory layout: {} (size: {}, alignment: {})",
                message, size, alignment
            ),
            Error::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for lanewise operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> Error {
    Error::LayoutError {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> Error {
    Error::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display() {
        let error = layout_error(1000, 31, "alignment must be power of two");
        let display = format!("{}", error);
        assert!(display.contains("Invalid memory layout"));
        assert!(display.contains("size: 1000"));
        assert!(display.contains("alignment: 31"));
        assert!(display.contains("alignment must be power of two"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("input slices must have same length");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("input slices must have same length"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = validation_error("test");
        let error2 = validation_error("test");
        let error3 = validation_error("other");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = validation_error("test error");

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
