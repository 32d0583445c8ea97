//! Error types shared by the sequential and parallel scorers.

use thiserror::Error;

/// Errors returned by the weight update entry points.
///
/// Every variant is detected before the first weight is written, so a failed
/// call leaves the caller's weight buffer untouched.
#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    /// A buffer length does not match the declared cardinality.
    #[error("Mismatched array lengths: {name} has {actual} elements, expected {expected}")]
    MismatchedLengths {
        /// Label of the offending buffer
        name: &'static str,
        /// Declared cardinality (N or F)
        expected: usize,
        /// Actual length of the buffer
        actual: usize,
    },

    /// A non-empty buffer was handed over as a null pointer.
    #[error("buffer `{0}` is null but its declared length is non-zero")]
    NullBuffer(&'static str),

    /// A robust loss parameter is not a positive finite number.
    #[error("loss parameter `{name}` must be positive and finite, got {value}")]
    InvalidLossParameter {
        /// Name of the parameter
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// The minimum depth is not a finite number.
    #[error("minimum depth must be finite, got {0}")]
    InvalidMinDepth(f64),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The correspondence chunk size is invalid.
    #[error("correspondence chunk size must be > 0, got {0}")]
    InvalidChunkSize(usize),

    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    ThreadPoolBuild(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = WeightError::MismatchedLengths {
            name: "weights",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Mismatched array lengths: weights has 2 elements, expected 3"
        );
        assert_eq!(
            WeightError::InvalidThreadCount(0).to_string(),
            "thread count must be > 0, got 0"
        );
    }
}
