//! User repository on top of a [`TableStore`].
//!
//! Each user is one entity under a fixed partition key, with the user id as
//! row key and `Name`/`Email` properties. The entity timestamp is the
//! record's creation time.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::{UserId, UserRecord};
use crate::infrastructure::{
    RepositoryError, RepositoryResult, TableEntity, TableStore, UserRepository,
};

const NAME_PROPERTY: &str = "Name";
const EMAIL_PROPERTY: &str = "Email";

/// Default partition key for user records.
pub const DEFAULT_USER_PARTITION_KEY: &str = "USER";

/// `UserRepository` backed by any `TableStore`.
#[derive(Clone)]
pub struct TableUserRepository {
    table: Arc<dyn TableStore>,
    partition_key: String,
}

impl std::fmt::Debug for TableUserRepository {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TableUserRepository")
            .field("table", &"Arc<dyn TableStore>")
            .field("partition_key", &self.partition_key)
            .finish()
    }
}

impl TableUserRepository {
    #[must_use]
    pub fn new(table: Arc<dyn TableStore>, partition_key: impl Into<String>) -> Self {
        Self {
            table,
            partition_key: partition_key.into(),
        }
    }
}

fn to_entity(partition_key: &str, user: &UserRecord) -> TableEntity {
    TableEntity::new(partition_key, user.user_id.to_string())
        .with_timestamp(user.created_at)
        .with_property(NAME_PROPERTY, user.name.clone())
        .with_property(EMAIL_PROPERTY, user.email.clone())
}

fn from_entity(entity: &TableEntity) -> RepositoryResult<UserRecord> {
    let user_id = UserId::parse(&entity.row_key).map_err(|error| {
        RepositoryError::StorageError(format!(
            "Malformed user row key '{}': {error}",
            entity.row_key
        ))
    })?;
    let created_at = entity.timestamp.ok_or_else(|| {
        RepositoryError::StorageError(format!("User {user_id} has no timestamp"))
    })?;

    Ok(UserRecord::new(
        user_id,
        entity.property(NAME_PROPERTY).unwrap_or_default(),
        entity.property(EMAIL_PROPERTY).unwrap_or_default(),
        created_at,
    ))
}

impl UserRepository for TableUserRepository {
    fn add(&self, user: &UserRecord) -> BoxFuture<'static, RepositoryResult<UserRecord>> {
        let insert = self.table.insert(to_entity(&self.partition_key, user));
        async move { from_entity(&insert.await?) }.boxed()
    }

    /// Lists readable user rows. Rows that do not map to a user are skipped
    /// with a warning.
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<UserRecord>>> {
        let query = self.table.query_partition(&self.partition_key);
        async move {
            let users = query
                .await?
                .iter()
                .filter_map(|entity| {
                    from_entity(entity)
                        .inspect_err(|error| {
                            tracing::warn!(
                                partition_key = %entity.partition_key,
                                row_key = %entity.row_key,
                                %error,
                                "Skipping unreadable user row"
                            );
                        })
                        .ok()
                })
                .collect();
            Ok(users)
        }
        .boxed()
    }
}
