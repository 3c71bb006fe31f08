//! Repository traits for domain entities.
//!
//! Repositories return boxed `Send` futures so they can be shared as
//! `Arc<dyn ...>` trait objects across axum handlers, and every future owns
//! what it needs (`'static`) so it can outlive the borrow of `self`.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Survey, SurveyId, SurveyResponse, UserRecord};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Entity was not found.
    #[error("{0} not found")]
    NotFound(String),

    /// An entity with the same key already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backing store failed or returned malformed data.
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Result type returned by repository futures.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Survey Repository
// =============================================================================

/// Repository for the survey aggregate.
///
/// Every operation runs under the store's single lock for its whole
/// duration. Values handed in are copied into the store and values handed
/// out are copies, so callers can mutate them freely.
pub trait SurveyRepository: Send + Sync {
    /// Lists every survey in insertion order.
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<Survey>>>;

    /// Finds a survey by its ID.
    ///
    /// Returns `Ok(None)` if no such survey exists.
    fn find_by_id(&self, id: SurveyId) -> BoxFuture<'static, RepositoryResult<Option<Survey>>>;

    /// Adds a new survey.
    fn add(&self, survey: &Survey) -> BoxFuture<'static, RepositoryResult<()>>;

    /// Replaces every stored field of an existing survey.
    ///
    /// # Errors
    ///
    /// `RepositoryError::NotFound` if the survey does not exist.
    fn update(&self, survey: &Survey) -> BoxFuture<'static, RepositoryResult<()>>;

    /// Deletes a survey and everything it owns.
    ///
    /// Idempotent: returns `Ok(false)` if the survey did not exist.
    fn delete(&self, id: SurveyId) -> BoxFuture<'static, RepositoryResult<bool>>;

    /// Appends a response to an existing survey.
    ///
    /// # Errors
    ///
    /// `RepositoryError::NotFound` if the survey does not exist.
    fn add_response(
        &self,
        survey_id: SurveyId,
        response: &SurveyResponse,
    ) -> BoxFuture<'static, RepositoryResult<()>>;
}

// =============================================================================
// User Repository
// =============================================================================

/// Repository for user directory records.
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns the record as persisted.
    fn add(&self, user: &UserRecord) -> BoxFuture<'static, RepositoryResult<UserRecord>>;

    /// Returns every stored user, in storage order.
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<UserRecord>>>;
}
