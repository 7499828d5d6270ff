//! Startup errors for scanguard.

use scanguard_net::NetError;
use thiserror::Error;

/// Errors raised while building a validator, before any URL is checked.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Configuration is invalid or unreadable
    #[error("config error: {0}")]
    Config(String),

    /// Resolver could not be constructed
    #[error("resolver error: {0}")]
    Resolver(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<NetError> for GuardError {
    fn from(err: NetError) -> Self {
        match err {
            NetError::Network(e) => Self::Io(e),
            other => Self::Resolver(other.to_string()),
        }
    }
}
