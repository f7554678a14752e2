//! Error types for distribution computations

use thiserror::Error;

/// Errors returned by the distribution engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
