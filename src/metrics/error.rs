//! Analytics error types.

use thiserror::Error;

/// Errors that can occur while feeding or querying the analytics engine.
///
/// Short series are not errors: a 5 minute ride simply has no 1 hour peak,
/// so those cases come back as `None` from the operation itself.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    /// Parallel arrays that must be sample-aligned have different lengths.
    #[error("Shape mismatch: {left} has {left_len} samples but {right} has {right_len}")]
    ShapeMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AnalyticsError {
    /// Shape error for a time array and the value channel paired with it.
    pub fn times_values(times: usize, values: usize) -> Self {
        AnalyticsError::ShapeMismatch {
            left: "times",
            left_len: times,
            right: "values",
            right_len: values,
        }
    }
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
