//! Error types for lattice setup and run I/O.

use thiserror::Error;

/// Errors surfaced while setting up or recording a simulation.
///
/// Out-of-range site coordinates are a programming error and panic instead.
#[derive(Debug, Error)]
pub enum IsingError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, IsingError>;

impl IsingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        IsingError::InvalidParameter(msg.into())
    }
}
