//! Row types shared by the SQLite and PostgreSQL adapters.
//!
//! Both schemas store ids as text, timestamps as epoch millis and amounts
//! as doubles, so one set of rows serves both backends.

use sqlx::FromRow;

use ledger_types::{Account, AccountId, RepoError, User, UserId};

/// User row from database.
#[derive(FromRow)]
pub struct DbUser {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DbUser {
    pub fn into_domain(self) -> User {
        User::from_parts(
            UserId::from(self.user_id),
            self.name,
            self.email,
            self.mobile_number,
            self.created_at,
            self.updated_at,
        )
    }
}

/// Account row from database.
#[derive(FromRow)]
pub struct DbAccount {
    pub account_id: String,
    pub user_id: String,
    pub document_number: String,
    pub current_balance: f64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DbAccount {
    pub fn into_domain(self) -> Account {
        Account::from_parts(
            AccountId::from(self.account_id),
            UserId::from(self.user_id),
            self.document_number,
            self.current_balance,
            self.status,
            self.created_at,
            self.updated_at,
        )
    }
}

/// Maps an insert failure, singling out unique-index violations.
pub fn insert_error(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(db.message().to_string())
        }
        _ => RepoError::Database(err.to_string()),
    }
}

pub fn query_error(err: sqlx::Error) -> RepoError {
    RepoError::Database(err.to_string())
}
