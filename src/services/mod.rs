//! Services driving the booking wizard.

use thiserror::Error;

use crate::forms::{FieldErrors, FormError};
use crate::repository::errors::RepositoryError;

pub mod lookup;
pub mod promotion;
pub mod wizard;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-level problems the user has to fix before continuing.
    #[error("form validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
