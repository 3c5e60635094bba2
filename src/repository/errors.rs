use thiserror::Error;

use crate::dto::api::IngestError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<IngestError> for RepositoryError {
    fn from(err: IngestError) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
