//! Error types for source sorting.

use std::path::PathBuf;

/// Result type for source sorting operations.
pub type SortResult<T> = Result<T, SortError>;

/// Errors that can occur while extracting or rewriting Rust source.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// Failed to read source file.
    #[error("Failed to read file {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Failed to write output file.
    #[error("Failed to write file {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Failed to parse Rust source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The ordering engine rejected the input or was cancelled.
    #[error(transparent)]
    Engine(#[from] depsort_core::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
