//! Error types for stay-engine operations.

use thiserror::Error;

/// Reasons a stay record is refused by validation.
///
/// The engine never surfaces these from a query: the normalizer turns them into
/// diagnostic strings and the planner into a rejected verdict. They are public
/// so callers constructing [`Stay`](crate::Stay) values directly can match on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StayError {
    /// One of the dates is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date in stay: {entry} to {exit}")]
    InvalidDate { entry: String, exit: String },

    /// A single date that failed to parse.
    #[error("Invalid date: {0}")]
    InvalidDateValue(String),

    /// The exit date lies before the entry date.
    #[error("Exit date before entry date: {entry} to {exit}")]
    InvertedRange { entry: String, exit: String },
}

/// Convenience alias used throughout stay-engine.
pub type Result<T> = std::result::Result<T, StayError>;
