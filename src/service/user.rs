//! User directory service.

use std::sync::Arc;

use crate::domain::{Timestamp, UserId, UserRecord, newest_first};
use crate::infrastructure::UserRepository;
use crate::service::ServiceError;

/// Application service for user records.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("UserService")
            .field("repository", &"Arc<dyn UserRepository>")
            .finish()
    }
}

impl UserService {
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Validates and stores a new user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::BadInput` if the name or email is blank.
    pub async fn add(&self, name: &str, email: &str) -> Result<UserRecord, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("User rejected: blank name");
            return Err(ServiceError::bad_input("Name is required"));
        }
        let email = email.trim();
        if email.is_empty() {
            tracing::debug!("User rejected: blank email");
            return Err(ServiceError::bad_input("Email is required"));
        }

        let user = UserRecord::new(UserId::generate_v7(), name, email, Timestamp::now());
        let stored = self.repository.add(&user).await?;
        tracing::info!(user_id = %stored.user_id, "User created");
        Ok(stored)
    }

    /// Lists every user, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unexpected` if the store fails.
    pub async fn list(&self) -> Result<Vec<UserRecord>, ServiceError> {
        Ok(newest_first(self.repository.list().await?))
    }
}
