//! # Motion Error Types
//!
//! Precondition violations raised by the motion and intent setters.

use thiserror::Error;

/// Errors raised when a motion request is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// An argument was NaN or otherwise outside its domain.
    #[error("invalid argument '{name}': {value}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{0}', expected #RRGGBB or #RGB")]
    InvalidColor(String),
}

/// Result type for motion operations.
pub type MotionResult<T> = Result<T, MotionError>;

/// Rejects NaN. Infinite values are allowed (continuous motion).
pub(crate) fn require_number(name: &'static str, value: f64) -> MotionResult<f64> {
    if value.is_nan() {
        Err(MotionError::InvalidArgument { name, value })
    } else {
        Ok(value)
    }
}
