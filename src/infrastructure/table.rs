//! Partitioned entity storage.
//!
//! Entities are addressed by a partition key and a row key and carry a bag
//! of string properties plus a store-assigned timestamp. [`TableStore`] is
//! the seam where a cloud table client would plug in; the crate ships the
//! in-memory [`InMemoryTableStore`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::Timestamp;
use crate::infrastructure::{RepositoryError, RepositoryResult};

// =============================================================================
// Table Entity
// =============================================================================

/// One row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntity {
    pub partition_key: String,
    pub row_key: String,
    /// Write time; assigned by the store when absent.
    pub timestamp: Option<Timestamp>,
    pub properties: BTreeMap<String, String>,
}

impl TableEntity {
    #[must_use]
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            timestamp: None,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

// =============================================================================
// Table Store
// =============================================================================

/// Minimal table storage interface.
pub trait TableStore: Send + Sync {
    /// Inserts a new entity and returns it as stored.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Conflict` if the partition/row key pair is taken.
    fn insert(&self, entity: TableEntity) -> BoxFuture<'static, RepositoryResult<TableEntity>>;

    /// Returns every entity in a partition, in no particular order.
    fn query_partition(
        &self,
        partition_key: &str,
    ) -> BoxFuture<'static, RepositoryResult<Vec<TableEntity>>>;
}

type EntityKey = (String, String);

/// In-memory `TableStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableStore {
    entities: Arc<RwLock<HashMap<EntityKey, TableEntity>>>,
}

impl InMemoryTableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for InMemoryTableStore {
    fn insert(&self, entity: TableEntity) -> BoxFuture<'static, RepositoryResult<TableEntity>> {
        let entities = Arc::clone(&self.entities);
        async move {
            let key = (entity.partition_key.clone(), entity.row_key.clone());
            let mut guard = entities.write().await;
            if guard.contains_key(&key) {
                return Err(RepositoryError::Conflict(format!("{}/{}", key.0, key.1)));
            }

            let stored = TableEntity {
                timestamp: Some(entity.timestamp.unwrap_or_else(Timestamp::now)),
                ..entity
            };
            guard.insert(key, stored.clone());
            Ok(stored)
        }
        .boxed()
    }

    fn query_partition(
        &self,
        partition_key: &str,
    ) -> BoxFuture<'static, RepositoryResult<Vec<TableEntity>>> {
        let entities = Arc::clone(&self.entities);
        let partition_key = partition_key.to_string();
        async move {
            let guard = entities.read().await;
            Ok(guard
                .values()
                .filter(|entity| entity.partition_key == partition_key)
                .cloned()
                .collect())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryTableStore {
        InMemoryTableStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_assigns_timestamp_when_missing(store: InMemoryTableStore) {
        let stored = store
            .insert(TableEntity::new("USER", "1").with_property("Name", "Ada"))
            .await
            .unwrap();
        assert!(stored.timestamp.is_some());
        assert_eq!(stored.property("Name"), Some("Ada"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_keeps_supplied_timestamp(store: InMemoryTableStore) {
        let timestamp = Timestamp::now();
        let stored = store
            .insert(TableEntity::new("USER", "1").with_timestamp(timestamp))
            .await
            .unwrap();
        assert_eq!(stored.timestamp, Some(timestamp));
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_duplicate_key_conflicts(store: InMemoryTableStore) {
        store.insert(TableEntity::new("USER", "1")).await.unwrap();
        let result = store.insert(TableEntity::new("USER", "1")).await;
        assert_eq!(
            result,
            Err(RepositoryError::Conflict("USER/1".to_string()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_same_row_key_in_other_partition_is_allowed(store: InMemoryTableStore) {
        store.insert(TableEntity::new("USER", "1")).await.unwrap();
        assert!(store.insert(TableEntity::new("ADMIN", "1")).await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn test_query_partition_filters_by_partition(store: InMemoryTableStore) {
        store.insert(TableEntity::new("USER", "1")).await.unwrap();
        store.insert(TableEntity::new("USER", "2")).await.unwrap();
        store.insert(TableEntity::new("ADMIN", "3")).await.unwrap();

        let mut rows: Vec<String> = store
            .query_partition("USER")
            .await
            .unwrap()
            .into_iter()
            .map(|entity| entity.row_key)
            .collect();
        rows.sort();
        assert_eq!(rows, vec!["1", "2"]);
        assert!(store.query_partition("NONE").await.unwrap().is_empty());
    }
}
