//! Error types for backend requests

use thiserror::Error;

/// Result type alias for backend requests
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message taken from the response body
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot be used
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of an API error
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend reported the entity as missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<ClientError> for solarops_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Decode(e) => Self::Serialization(e),
            other => Self::Other(other.to_string()),
        }
    }
}
