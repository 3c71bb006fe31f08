//! User directory records.
//!
//! Users are unrelated to surveys; responses stay anonymous.

use serde::{Deserialize, Serialize};

use super::identifier::{Timestamp, UserId};

/// A minimal user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl UserRecord {
    #[must_use]
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            created_at,
        }
    }
}

/// Sorts records most recent first.
///
/// Equal timestamps fall back to descending user id, so the order does not
/// depend on the order the store returned.
#[must_use]
pub fn newest_first(mut users: Vec<UserRecord>) -> Vec<UserRecord> {
    users.sort_by(|left, right| {
        (right.created_at, right.user_id).cmp(&(left.created_at, left.user_id))
    });
    users
}
