//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use ledger_types::{
    Account, AccountId, AccountRepository, RepoError, Transaction, TransactionRepository, User,
    UserId, UserRepository,
};

use crate::types::{DbAccount, DbUser, insert_error, query_error};

const SCHEMA: &str = include_str!("../migrations/0001_create_tables.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        tracing::info!("sqlite schema ready");

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Port implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for SqliteRepo {
    async fn create_user(&self, user: &User) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO users (user_id, name, email, mobile_number, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.user_id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.mobile_number)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        tracing::debug!(user_id = %user.user_id, "user inserted");
        Ok(())
    }

    async fn find_user_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT user_id, name, email, mobile_number, created_at, updated_at
               FROM users WHERE mobile_number = ?"#,
        )
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(DbUser::into_domain))
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT user_id, name, email, mobile_number, created_at, updated_at
               FROM users WHERE user_id = ?"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(DbUser::into_domain))
    }
}

#[async_trait]
impl AccountRepository for SqliteRepo {
    async fn create_account(&self, account: &Account) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO accounts
               (account_id, user_id, document_number, current_balance, status, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(account.account_id.as_str())
        .bind(account.user_id.as_str())
        .bind(&account.document_number)
        .bind(account.current_balance)
        .bind(&account.status)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        tracing::debug!(account_id = %account.account_id, "account inserted");
        Ok(())
    }

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepoError> {
        let row: Option<DbAccount> = sqlx::query_as(
            r#"SELECT account_id, user_id, document_number, current_balance, status, created_at, updated_at
               FROM accounts WHERE account_id = ?"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(DbAccount::into_domain))
    }
}

#[async_trait]
impl TransactionRepository for SqliteRepo {
    async fn create_transaction(&self, transaction: &Transaction) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO transactions
               (transaction_id, account_id, operation_type, amount, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(transaction.id.as_str())
        .bind(transaction.account_id.as_str())
        .bind(transaction.operation_type.stored_name())
        .bind(transaction.amount)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        tracing::debug!(transaction_id = %transaction.id, "transaction inserted");
        Ok(())
    }
}
