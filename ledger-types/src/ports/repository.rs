//! Repository port traits.
//!
//! One port per entity. Adapters (Postgres, SQLite, in-memory mocks)
//! implement these traits; services depend only on them.
//!
//! None of these calls are atomic with each other: a read followed by a write
//! from a service may interleave with other requests.

use std::sync::Arc;

use crate::domain::{Account, AccountId, Transaction, User, UserId};
use crate::error::RepoError;

/// Persistence port for users.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts a new user.
    ///
    /// Returns `RepoError::Conflict` if the store enforces mobile number
    /// uniqueness and the number is already taken.
    async fn create_user(&self, user: &User) -> Result<(), RepoError>;

    /// Finds a user by mobile number.
    async fn find_user_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<User>, RepoError>;

    /// Finds a user by ID.
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, RepoError>;
}

/// Persistence port for accounts.
#[async_trait::async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Inserts a new account.
    async fn create_account(&self, account: &Account) -> Result<(), RepoError>;

    /// Finds an account by ID.
    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepoError>;
}

/// Persistence port for transactions (append-only).
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Inserts a new transaction.
    async fn create_transaction(&self, transaction: &Transaction) -> Result<(), RepoError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared adapters: one repository instance can back several services.
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn create_user(&self, user: &User) -> Result<(), RepoError> {
        (**self).create_user(user).await
    }

    async fn find_user_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<User>, RepoError> {
        (**self).find_user_by_mobile_number(mobile_number).await
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, RepoError> {
        (**self).find_user_by_id(id).await
    }
}

#[async_trait::async_trait]
impl<T: AccountRepository + ?Sized> AccountRepository for Arc<T> {
    async fn create_account(&self, account: &Account) -> Result<(), RepoError> {
        (**self).create_account(account).await
    }

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepoError> {
        (**self).find_account_by_id(id).await
    }
}

#[async_trait::async_trait]
impl<T: TransactionRepository + ?Sized> TransactionRepository for Arc<T> {
    async fn create_transaction(&self, transaction: &Transaction) -> Result<(), RepoError> {
        (**self).create_transaction(transaction).await
    }
}
