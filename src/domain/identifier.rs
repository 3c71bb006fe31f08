//! Identifier and timestamp value objects.
//!
//! Every entity in the survey aggregate is keyed by its own UUID newtype so
//! that a question id can never be passed where an option id is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID without generating a new one.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generates a fresh random identifier (v4).
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Generates a fresh time-ordered identifier (v7).
            #[must_use]
            pub fn generate_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Parses the hyphenated or simple textual form of a UUID.
            ///
            /// # Errors
            ///
            /// Returns the underlying [`uuid::Error`] when `value` is not a UUID.
            pub fn parse(value: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(value.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a survey.
    SurveyId
);

uuid_identifier!(
    /// Unique identifier for a question within a survey.
    QuestionId
);

uuid_identifier!(
    /// Unique identifier for an option of a single-choice question.
    ///
    /// Clients may supply option ids on create/update to keep stable keys
    /// across edits.
    OptionId
);

uuid_identifier!(
    /// Unique identifier for one submitted response.
    ResponseId
);

uuid_identifier!(
    /// Unique identifier for one answer inside a response.
    ResponseItemId
);

uuid_identifier!(
    /// Unique identifier for a user record.
    UserId
);

/// A UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wraps an existing `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Reads the system clock.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}
