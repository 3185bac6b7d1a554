//! Configuration errors.

use thiserror::Error;

/// Loading failed before validation could run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that the server refuses to start with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required setting {0}")]
    MissingRequired(&'static str),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("request timeout must be 1-300 seconds")]
    InvalidTimeout,

    #[error("{0} is not a bindable address")]
    InvalidSocketAddr(String),

    #[error("database url must use postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("min_connections is larger than max_connections")]
    InvalidPoolSize,

    #[error("max_connections is capped at 100")]
    PoolSizeTooLarge,

    #[error("session secret must be at least {0} bytes outside development")]
    JwtSecretTooShort(usize),

    #[error("{0} is not an absolute path")]
    InvalidPath(String),

    #[error("{field} must be in {min}..={max}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
    },
}
