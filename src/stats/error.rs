//! Error conditions reported by the statistics engine.
//!
//! Every engine function either returns a finite result or one of these
//! conditions. None of them is fatal; callers decide how to present them.

use thiserror::Error;

/// Failure classification for engine computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// A parameter violates its precondition (non-positive denominator,
    /// non-finite number, subgroup size outside the constant table, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The sample is empty or too short to produce a result.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The result is mathematically undefined for this input.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

impl StatsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StatsError::InvalidInput(message.into())
    }

    pub(crate) fn insufficient(message: impl Into<String>) -> Self {
        StatsError::InsufficientData(message.into())
    }

    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        StatsError::OutOfRange(message.into())
    }
}

/// Result alias used throughout the engine.
pub type StatsResult<T> = std::result::Result<T, StatsError>;
