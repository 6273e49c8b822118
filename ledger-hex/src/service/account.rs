//! Account opening and lookup.

use std::sync::Arc;

use ledger_types::{
    Account, AccountId, AccountRepository, AppError, Clock, CreateAccountRequest,
    CreateAccountResponse, DomainError, GetAccountResponse, UserRepository,
};

use super::storage_failure;

/// Opens accounts for existing users and reads them back by id.
pub struct AccountService<A: AccountRepository, U: UserRepository> {
    accounts: A,
    users: U,
    clock: Arc<dyn Clock>,
}

impl<A: AccountRepository, U: UserRepository> AccountService<A, U> {
    pub fn new(accounts: A, users: U, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            users,
            clock,
        }
    }

    /// Opens an account for `req.user_id`.
    ///
    /// The owning user must exist; otherwise the request is rejected as a
    /// bad request since the id came from the caller.
    pub async fn create_account(
        &self,
        req: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, AppError> {
        let owner = self
            .users
            .find_user_by_id(&req.user_id)
            .await
            .map_err(storage_failure("find_user_by_id"))?;

        if owner.is_none() {
            tracing::info!(user_id = %req.user_id, "account owner does not exist");
            return Err(DomainError::UnknownUser.into());
        }

        let account = Account::open(req.user_id, req.document_number, self.clock.utc());

        self.accounts
            .create_account(&account)
            .await
            .map_err(storage_failure("create_account"))?;

        tracing::info!(account_id = %account.account_id, "account created");
        Ok(CreateAccountResponse {
            account_id: account.account_id,
            document_number: account.document_number,
        })
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: &AccountId) -> Result<GetAccountResponse, AppError> {
        let account = self
            .accounts
            .find_account_by_id(id)
            .await
            .map_err(storage_failure("find_account_by_id"))?
            .ok_or(AppError::NotFound)?;

        Ok(GetAccountResponse {
            account_id: account.account_id,
            user_id: account.user_id,
            document_number: account.document_number,
        })
    }
}
