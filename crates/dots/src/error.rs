//! Error type shared by every fallible operation in the crate.
//!
//! All variants are precondition violations reported at the offending call.
//! Nothing here is transient; a failing call leaves the simplifier unchanged.

use thiserror::Error;

/// Result alias used across the crate.
pub type DotsResult<T> = Result<T, DotsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DotsError {
    /// Input offered to a simplifier that has already been finished.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Index outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Closed range with `lo > hi`.
    #[error("empty range [{lo}, {hi}]")]
    EmptyRange { lo: usize, hi: usize },

    /// Timestamps that would make the synchronized distance undefined.
    #[error("domain error: {0}")]
    Domain(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Index sequence that is not a simplification of the trajectory.
    #[error("invalid simplification: {0}")]
    InvalidSimplification(String),
}
