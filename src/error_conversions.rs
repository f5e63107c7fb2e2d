//! Error conversion glue between the layers.
//!
//! The domain layer must not depend on service/repository error types, so
//! the conversions live here and are only compiled with the `wizard` feature.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(vec![val.to_string()])
    }
}
