//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use ledger_types::{
    Account, AccountId, AccountRepository, RepoError, Transaction, TransactionRepository, User,
    UserId, UserRepository,
};

use crate::types::{DbAccount, DbUser, insert_error, query_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    tracing::info!(migration = name, "migration applied");
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Port implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for PostgresRepo {
    async fn create_user(&self, user: &User) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO users (user_id, name, email, mobile_number, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
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
               FROM users WHERE mobile_number = $1"#,
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
               FROM users WHERE user_id = $1"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(DbUser::into_domain))
    }
}

#[async_trait]
impl AccountRepository for PostgresRepo {
    async fn create_account(&self, account: &Account) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO accounts
               (account_id, user_id, document_number, current_balance, status, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
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
               FROM accounts WHERE account_id = $1"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(DbAccount::into_domain))
    }
}

#[async_trait]
impl TransactionRepository for PostgresRepo {
    async fn create_transaction(&self, transaction: &Transaction) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO transactions
               (transaction_id, account_id, operation_type, amount, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
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
