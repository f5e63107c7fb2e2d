use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Validation error: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Failures the user can retry without changing the draft.
    pub fn is_transport(&self) -> bool {
        matches!(self, RepositoryError::ConnectionError(_))
    }
}
