use std::error::Error;
use thiserror::Error;

/// Result alias for trivia source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Error raised by trivia source backends regardless of the underlying transport.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("trivia source unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    #[error("trivia source returned an unexpected payload: {message}")]
    SchemaMismatch {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl SourceError {
    /// Construct an unavailable error from any transport or status failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        SourceError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a schema mismatch error from a decoding failure.
    pub fn schema_mismatch(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        SourceError::SchemaMismatch {
            message,
            source: Box::new(source),
        }
    }
}
