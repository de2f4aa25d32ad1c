//! Error types for depsort-core.

use thiserror::Error;

/// Result type for depsort-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing an order.
///
/// Cycles and comparator ties are regular cases and never show up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Input rejected before any graph work (duplicate ids, bad ranges).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The cancellation probe fired; no order was produced.
    #[error("ordering cancelled")]
    Cancelled,
}

impl Error {
    /// Whether this is the cancellation outcome rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
