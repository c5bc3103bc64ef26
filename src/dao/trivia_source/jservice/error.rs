//! Error types shared by the trivia API client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::source::SourceError;

/// Convenient result alias returning [`JServiceError`] failures.
pub type JServiceResult<T> = Result<T, JServiceError>;

/// Failures that can occur while talking to the trivia API.
#[derive(Debug, Error)]
pub enum JServiceError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build trivia API client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent or timed out.
    #[error("failed to send trivia API request to `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status code.
    #[error("unexpected trivia API response status {status} for `{path}`")]
    RequestStatus { path: String, status: StatusCode },
    /// The response body could not be read.
    #[error("failed to read trivia API response for `{path}`")]
    ReadBody {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body is not the JSON shape we expect.
    #[error("failed to decode trivia API response for `{path}`")]
    DecodeBody {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<JServiceError> for SourceError {
    fn from(err: JServiceError) -> Self {
        let message = err.to_string();
        match err {
            JServiceError::DecodeBody { .. } => SourceError::schema_mismatch(message, err),
            _ => SourceError::unavailable(message, err),
        }
    }
}
