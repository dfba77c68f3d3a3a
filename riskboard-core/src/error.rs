//! Typed errors raised by scoring and sorting lookups

use thiserror::Error;

/// Errors raised by the scoring library.
///
/// The only failure the pure functions recognize is an input string that does not
/// belong to a closed vocabulary. Degenerate arithmetic never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("invalid {field} value '{value}'")]
    InvalidEnumValue { field: &'static str, value: String },
}

impl ScoringError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        ScoringError::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }
}
