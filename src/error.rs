//! Error types.

use thiserror::Error;

/// Errors raised while setting up a search.
#[derive(Debug, Error)]
pub enum TabuError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// Errors raised while reading a QBF instance.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing domain size")]
    MissingSize,

    #[error("domain size {size} is too large")]
    SizeTooLarge { size: usize },

    #[error("malformed number {token:?}")]
    Parse { token: String },

    #[error("expected {expected} matrix coefficients, found {found}")]
    Truncated { expected: usize, found: usize },
}
