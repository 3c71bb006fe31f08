//! Repository configuration and assembly.
//!
//! # Environment Variables
//!
//! - `SEED_EXAMPLE_SURVEY`: `true` (default) | `false`
//! - `USER_PARTITION_KEY`: partition for user records (default `USER`)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repositories = RepositoryFactory::new(config).create();
//! let surveys = repositories.survey_repository.list().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::{
    DEFAULT_USER_PARTITION_KEY, InMemorySurveyRepository, InMemoryTableStore, SurveyRepository,
    SurveyStore, TableUserRepository, UserRepository,
};

// =============================================================================
// Configuration Types
// =============================================================================

/// A boolean switch read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl FromStr for Flag {
    type Err = ConfigurationError;

    /// Parses `true/false`, `1/0`, `yes/no` or `on/off`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidFlag` for anything else.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Self(true)),
            "false" | "0" | "no" | "off" => Ok(Self(false)),
            _ => Err(ConfigurationError::InvalidFlag(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Whether a fresh survey store starts with the example survey.
    pub seed_example_survey: bool,
    /// Partition key under which user records are stored.
    pub user_partition_key: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            seed_example_survey: true,
            user_partition_key: DEFAULT_USER_PARTITION_KEY.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| {
            env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        let seed_example_survey = match read_variable(&lookup, "SEED_EXAMPLE_SURVEY") {
            Some(value) => value.parse::<Flag>()?.0,
            None => defaults.seed_example_survey,
        };
        let user_partition_key = read_variable(&lookup, "USER_PARTITION_KEY")
            .unwrap_or(defaults.user_partition_key);

        let config = Self {
            seed_example_survey,
            user_partition_key,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidPartitionKey` if the user
    /// partition key is empty or contains a reserved character.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let key = &self.user_partition_key;
        if key.is_empty()
            || key.chars().any(|character| {
                matches!(character, '/' | '\\' | '#' | '?') || character.is_control()
            })
        {
            return Err(ConfigurationError::InvalidPartitionKey(key.clone()));
        }

        Ok(())
    }
}

/// Reads `name` through `lookup`, trimmed; blank values count as unset.
pub(crate) fn read_variable(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Builder for `RepositoryConfig`.
///
/// # Example
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .seed_example_survey(false)
///     .user_partition_key("PEOPLE")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    seed_example_survey: Option<bool>,
    user_partition_key: Option<String>,
}

impl RepositoryConfigBuilder {
    #[must_use]
    pub const fn seed_example_survey(mut self, seed: bool) -> Self {
        self.seed_example_survey = Some(seed);
        self
    }

    #[must_use]
    pub fn user_partition_key(mut self, key: impl Into<String>) -> Self {
        self.user_partition_key = Some(key.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let defaults = RepositoryConfig::default();
        let config = RepositoryConfig {
            seed_example_survey: self
                .seed_example_survey
                .unwrap_or(defaults.seed_example_survey),
            user_partition_key: self
                .user_partition_key
                .unwrap_or(defaults.user_partition_key),
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A boolean variable held something other than a recognised flag.
    #[error("Invalid flag value: '{0}'. Expected 'true' or 'false'")]
    InvalidFlag(String),

    /// The user partition key is unusable.
    #[error("Invalid partition key: '{0}'")]
    InvalidPartitionKey(String),

    #[error("Invalid port: '{0}'. Expected a number between 1 and 65535")]
    InvalidPort(String),

    #[error("Invalid server address: '{0}'")]
    InvalidAddress(String),

    #[error("Invalid worker thread count: '{0}'. Expected a positive number")]
    InvalidWorkerThreads(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Collection of initialized repositories.
#[derive(Clone)]
pub struct Repositories {
    pub survey_repository: Arc<dyn SurveyRepository>,
    pub user_repository: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Repositories")
            .field("survey_repository", &"Arc<dyn SurveyRepository>")
            .field("user_repository", &"Arc<dyn UserRepository>")
            .finish()
    }
}

/// Factory for creating repository instances based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates all repositories over fresh in-memory stores.
    #[must_use]
    pub fn create(&self) -> Repositories {
        let store = if self.config.seed_example_survey {
            SurveyStore::seeded()
        } else {
            SurveyStore::new()
        };

        Repositories {
            survey_repository: Arc::new(InMemorySurveyRepository::new(store)),
            user_repository: Arc::new(TableUserRepository::new(
                Arc::new(InMemoryTableStore::new()),
                self.config.user_partition_key.clone(),
            )),
        }
    }
}
