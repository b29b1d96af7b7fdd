//! Error types for girder engine operations.

use thiserror::Error;

/// The error type for girder engine operations.
///
/// The error surface is deliberately narrow: malformed snapshot input
/// (dangling edges, self-loops, duplicates) is sanitized rather than
/// rejected, and an empty snapshot is a valid input everywhere. Only
/// configuration mistakes are surfaced to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value was out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// A specialized Result type for girder operations.
pub type Result<T> = std::result::Result<T, Error>;
