//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a User.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new random UserId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered person, identified for contact purposes by mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Unique across all users
    pub mobile_number: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
}

impl User {
    /// Builds a new user with a fresh identifier, stamped at `now`.
    ///
    /// Blank `name` / `email` values are stored as absent.
    pub fn register(
        name: Option<String>,
        email: Option<String>,
        mobile_number: String,
        now: DateTime<Utc>,
    ) -> Self {
        let millis = now.timestamp_millis();
        Self {
            user_id: UserId::new(),
            name: name.filter(|n| !n.trim().is_empty()),
            email: email.filter(|e| !e.trim().is_empty()),
            mobile_number,
            created_at: millis,
            updated_at: millis,
        }
    }

    /// Reconstructs a user from stored fields.
    pub fn from_parts(
        user_id: UserId,
        name: Option<String>,
        email: Option<String>,
        mobile_number: String,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            user_id,
            name,
            email,
            mobile_number,
            created_at,
            updated_at,
        }
    }
}
