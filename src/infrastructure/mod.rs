//! Infrastructure module for storage.
//!
//! This module contains the survey store and repository, the table store
//! behind the user directory, repository assembly and listener
//! configuration.

pub mod factory;
pub mod in_memory;
pub mod repository;
pub mod server;
pub mod store;
pub mod table;
pub mod user;

pub use factory::{
    ConfigurationError, Repositories, RepositoryConfig, RepositoryConfigBuilder, RepositoryFactory,
};
pub use in_memory::InMemorySurveyRepository;
pub use repository::{RepositoryError, RepositoryResult, SurveyRepository, UserRepository};
pub use server::{DEFAULT_PORT, ServerConfig};
pub use store::{SurveyStore, example_survey};
pub use table::{InMemoryTableStore, TableEntity, TableStore};
pub use user::{DEFAULT_USER_PARTITION_KEY, TableUserRepository};
