//! Service-level error taxonomy.

use thiserror::Error;

use crate::domain::LifecycleError;
use crate::infrastructure::RepositoryError;

/// Failure of a service operation.
///
/// The variant decides the HTTP status; the message is shown to the caller
/// for every variant except [`ServiceError::Unexpected`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request content failed validation.
    #[error("{0}")]
    BadInput(String),

    /// The operation is not allowed in the entity's current state.
    #[error("{0}")]
    InvalidTransition(String),

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Anything else.
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub(crate) fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput(message.into())
    }

    pub(crate) fn survey_not_found() -> Self {
        Self::NotFound("Survey not found".to_string())
    }
}

impl From<LifecycleError> for ServiceError {
    fn from(error: LifecycleError) -> Self {
        Self::InvalidTransition(error.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => Self::NotFound(error.to_string()),
            RepositoryError::Conflict(_) | RepositoryError::StorageError(_) => {
                Self::Unexpected(error.to_string())
            }
        }
    }
}
