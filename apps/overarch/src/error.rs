//! Application error type.

use overarch_core::ResolveError;
use thiserror::Error;

/// Errors surfaced by the `overarch` binary. Every variant exits with status 1.
#[derive(Debug, Error)]
pub enum OverarchError {
    /// The stage list or expression was rejected.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The configuration file could not be parsed or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// One or more expressions passed to `check` were rejected.
    #[error("{failed} of {total} expressions failed validation")]
    CheckFailed { failed: usize, total: usize },
}
