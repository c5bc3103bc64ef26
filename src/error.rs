use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::{
    dao::source::SourceError,
    state::{
        board::{BoardError, CategoryId},
        state_machine::Generation,
    },
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network or HTTP failure talking to the trivia API.
    #[error(transparent)]
    SourceUnavailable(SourceError),
    /// The trivia API answered with a payload we cannot use.
    #[error(transparent)]
    SchemaMismatch(SourceError),
    /// The API returned fewer unique categories than a board needs.
    #[error("category pool too small: {available} unique categories, {required} required")]
    InsufficientPool {
        /// Categories a board needs.
        required: usize,
        /// Unique categories the API returned.
        available: usize,
    },
    /// A category has fewer clues than a board column needs.
    #[error("category `{category}` has {available} clues, {required} required")]
    InsufficientClues {
        /// Category that came back short.
        category: CategoryId,
        /// Clues a column needs.
        required: usize,
        /// Clues the API returned.
        available: usize,
    },
    /// A cell coordinate outside the board.
    #[error("cell ({category}, {clue}) is outside the board")]
    IndexOutOfRange {
        /// Requested category index.
        category: usize,
        /// Requested clue index.
        clue: usize,
    },
    /// A restart replaced the fetch phase this request was waiting on.
    #[error("game start {generation} was superseded by a restart")]
    Superseded {
        /// Generation whose result was discarded.
        generation: Generation,
    },
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// A background task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SourceError> for ServiceError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable { .. } => ServiceError::SourceUnavailable(err),
            SourceError::SchemaMismatch { .. } => ServiceError::SchemaMismatch(err),
        }
    }
}

impl From<BoardError> for ServiceError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::IndexOutOfRange { category, clue } => {
                ServiceError::IndexOutOfRange { category, clue }
            }
            other => ServiceError::InvalidState(other.to_string()),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The trivia API failed or returned unusable data.
    #[error("bad gateway: {0}")]
    BadGateway(String),
    /// Unexpected server-side failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::SourceUnavailable(_)
            | ServiceError::SchemaMismatch(_)
            | ServiceError::InsufficientPool { .. }
            | ServiceError::InsufficientClues { .. } => AppError::BadGateway(message),
            ServiceError::IndexOutOfRange { .. } => AppError::BadRequest(message),
            ServiceError::Superseded { .. } | ServiceError::InvalidState(_) => {
                AppError::Conflict(message)
            }
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Internal(_) => AppError::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn io_source() -> io::Error {
        io::Error::new(io::ErrorKind::TimedOut, "timed out")
    }

    #[test]
    fn source_errors_keep_their_kind() {
        let unavailable = SourceError::unavailable("down".into(), io_source());
        assert!(matches!(
            ServiceError::from(unavailable),
            ServiceError::SourceUnavailable(_)
        ));

        let mismatch = SourceError::schema_mismatch("bad".into(), io_source());
        assert!(matches!(
            ServiceError::from(mismatch),
            ServiceError::SchemaMismatch(_)
        ));
    }

    #[test]
    fn http_status_follows_error_kind() {
        let cases = [
            (
                ServiceError::InsufficientPool {
                    required: 6,
                    available: 2,
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ServiceError::IndexOutOfRange {
                    category: 9,
                    clue: 0,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Superseded { generation: 1 },
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::NotFound("no board".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::Internal("task cancelled".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
