//! Ledger Application Services
//!
//! Orchestrate domain rules through the repository ports.
//! Contain NO infrastructure logic - pure business orchestration.
//!
//! Each service is generic over the port traits it needs, so adapters are
//! injected at compile time:
//! - `UserService<U>` - mobile number uniqueness
//! - `AccountService<A, U>` - owner existence, reads by id
//! - `TransactionService<T, A>` - sign rules, account existence
//!
//! No service calls another service.

mod account;
mod transaction;
mod user;

use std::sync::Arc;

use ledger_types::{
    AccountRepository, AppError, Clock, RepoError, TransactionRepository, UserRepository,
};

pub use account::AccountService;
pub use transaction::TransactionService;
pub use user::UserService;

/// A single adapter that backs every port.
pub trait LedgerRepository: UserRepository + AccountRepository + TransactionRepository {}

impl<T> LedgerRepository for T where T: UserRepository + AccountRepository + TransactionRepository {}

/// The three services wired over one shared repository.
pub struct LedgerServices<R: LedgerRepository> {
    pub users: UserService<Arc<R>>,
    pub accounts: AccountService<Arc<R>, Arc<R>>,
    pub transactions: TransactionService<Arc<R>, Arc<R>>,
}

impl<R: LedgerRepository> LedgerServices<R> {
    /// Builds all services over `repo`, stamping times with `clock`.
    pub fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        let repo = Arc::new(repo);
        Self {
            users: UserService::new(repo.clone(), clock.clone()),
            accounts: AccountService::new(repo.clone(), repo.clone(), clock.clone()),
            transactions: TransactionService::new(repo.clone(), repo, clock),
        }
    }
}

/// Logs a failed port call and hides it behind `AppError::Internal`.
pub(crate) fn storage_failure(operation: &'static str) -> impl FnOnce(RepoError) -> AppError {
    move |err| {
        tracing::error!(operation, error = %err, "storage call failed");
        AppError::Internal
    }
}
