//! Data setup error types.

use thiserror::Error;

/// Data setup error type.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Obtaining the admin token failed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// API error.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Resource already exists.
    #[error("{resource_type} already exists: {id}")]
    AlreadyExists {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// A create call returned no `Location` header.
    #[error("response for created {0} has no Location header")]
    MissingLocation(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Data setup result type.
pub type SetupResult<T> = Result<T, SetupError>;
