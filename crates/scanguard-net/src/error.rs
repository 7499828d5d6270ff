use thiserror::Error;

/// Result type alias for network operations
pub type NetResult<T> = std::result::Result<T, NetError>;

/// Errors from resolvers
#[derive(Error, Debug)]
pub enum NetError {
    /// DNS resolution error
    #[error("DNS error: {0}")]
    Dns(String),

    /// Resolver could not be constructed
    #[error("resolver setup failed: {0}")]
    Resolver(String),

    /// Network I/O error
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// Timeout
    #[error("resolution timed out after {0} ms")]
    Timeout(u64),
}
