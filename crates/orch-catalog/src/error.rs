//! Error types for catalog operations.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend could not be reached or the request never completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status on a get, update or
    /// delete. List calls never produce this variant; see
    /// [`crate::client::ListOutcome`].
    #[error("api error: status {status}: {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, or a placeholder when the body was unreadable.
        message: String,
    },

    /// A request or response body could not be (de)serialized.
    #[error("codec error: {0}")]
    Codec(String),

    /// Invalid client configuration, e.g. a malformed base URL.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Creates an API error from a status code and body text.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Codec(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CatalogError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = CatalogError::api(404, "no such package");
        assert_eq!(err.to_string(), "api error: status 404: no such package");

        let err = CatalogError::Config("bad url".to_string());
        assert_eq!(err.to_string(), "configuration error: bad url");
    }

    #[test]
    fn api_helper_keeps_status() {
        match CatalogError::api(500, "boom") {
            CatalogError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            _ => panic!("expected Api error"),
        }
    }
}
