//! Error types for Repaso operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Repaso operations.
///
/// Buffer errors (`EmptyBuffer`, `IndexOutOfBounds`) indicate a sequencing
/// defect inside this crate: the replay wrappers guard every pop, so these
/// variants are unreachable under correct use and should be treated as fatal.
///
/// # Examples
///
/// ```
/// use repaso::error::RepasoError;
///
/// let err = RepasoError::IndexOutOfBounds { index: 10, len: 5 };
/// assert!(err.to_string().contains("index 10"));
/// ```
#[derive(Debug)]
pub enum RepasoError {
    /// Pop attempted on an empty retention buffer.
    EmptyBuffer,

    /// Buffer access outside `[0, len)`.
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Buffer length at the time of access
        len: usize,
    },

    /// Invalid hyperparameter value provided at construction.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Feature vector length doesn't match the model.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for RepasoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepasoError::EmptyBuffer => {
                write!(f, "pop attempted on empty buffer")
            }
            RepasoError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (len={len})")
            }
            RepasoError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            RepasoError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            RepasoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RepasoError {}

impl From<&str> for RepasoError {
    fn from(msg: &str) -> Self {
        RepasoError::Other(msg.to_string())
    }
}

impl From<String> for RepasoError {
    fn from(msg: String) -> Self {
        RepasoError::Other(msg)
    }
}

impl RepasoError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RepasoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_display() {
        let err = RepasoError::EmptyBuffer;
        assert!(err.to_string().contains("empty buffer"));
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let err = RepasoError::IndexOutOfBounds { index: 10, len: 5 };
        let msg = err.to_string();
        assert!(msg.contains("index 10"));
        assert!(msg.contains("len=5"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = RepasoError::invalid_hyperparameter("p", -0.1, "0 <= p <= 1");
        let msg = err.to_string();
        assert!(msg.contains("Invalid hyperparameter"));
        assert!(msg.contains("p = -0.1"));
        assert!(msg.contains("0 <= p <= 1"));
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = RepasoError::dimension_mismatch("features", 4, 2);
        let msg = err.to_string();
        assert!(msg.contains("features=4"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn test_from_str() {
        let err: RepasoError = "test error".into();
        assert!(matches!(err, RepasoError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: RepasoError = "test error".to_string().into();
        assert!(matches!(err, RepasoError::Other(_)));
    }

    #[test]
    fn test_error_debug_impl() {
        let err = RepasoError::EmptyBuffer;
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("EmptyBuffer"));
    }

    #[test]
    fn test_error_source_is_none() {
        use std::error::Error;
        let err = RepasoError::EmptyBuffer;
        assert!(err.source().is_none());
    }
}
