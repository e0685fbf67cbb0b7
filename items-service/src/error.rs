//! Process-level errors
//!
//! These cover startup and serving. Request failures never reach this type;
//! handlers answer them with [`crate::handlers::ApiError`].

use thiserror::Error;

/// Result type alias using the service's [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and serving errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A required configuration value is absent
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
