//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Unique identifier for an Account.
///
/// Opaque to the core: values supplied by callers are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new random AccountId.
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

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ledger container owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: AccountId,
    /// Owning user
    pub user_id: UserId,
    /// Opaque document reference (e.g. national ID); not unique
    pub document_number: String,
    /// Stored only, never maintained by the services
    pub current_balance: f64,
    /// Stored only, never driven by the services
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    /// Opens a new account for `user_id` with a zero balance.
    pub fn open(user_id: UserId, document_number: String, now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis();
        Self {
            account_id: AccountId::new(),
            user_id,
            document_number,
            current_balance: 0.0,
            status: String::new(),
            created_at: millis,
            updated_at: millis,
        }
    }

    /// Reconstructs an account from stored fields.
    pub fn from_parts(
        account_id: AccountId,
        user_id: UserId,
        document_number: String,
        current_balance: f64,
        status: String,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            account_id,
            user_id,
            document_number,
            current_balance,
            status,
            created_at,
            updated_at,
        }
    }
}
