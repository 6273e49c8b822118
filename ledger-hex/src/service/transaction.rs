//! Transaction recording.

use std::sync::Arc;

use ledger_types::domain::transaction::validate_transaction_rules;
use ledger_types::{
    AccountRepository, AppError, Clock, CreateTransactionRequest, CreateTransactionResponse,
    DomainError, Transaction, TransactionRepository,
};

use super::storage_failure;

/// Records transactions against existing accounts.
pub struct TransactionService<T: TransactionRepository, A: AccountRepository> {
    transactions: T,
    accounts: A,
    clock: Arc<dyn Clock>,
}

impl<T: TransactionRepository, A: AccountRepository> TransactionService<T, A> {
    pub fn new(transactions: T, accounts: A, clock: Arc<dyn Clock>) -> Self {
        Self {
            transactions,
            accounts,
            clock,
        }
    }

    /// Records a transaction.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. operation type is known and the amount has the required sign
    /// 2. the referenced account exists
    ///
    /// Only then is the transaction written, with its operation type upper-cased.
    pub async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<CreateTransactionResponse, AppError> {
        let operation_type = validate_transaction_rules(&req.operation_type, req.amount)
            .inspect_err(|e| tracing::debug!(reason = %e, "transaction rejected"))?;

        let account = self
            .accounts
            .find_account_by_id(&req.account_id)
            .await
            .map_err(storage_failure("find_account_by_id"))?;

        if account.is_none() {
            tracing::info!(account_id = %req.account_id, "transaction references unknown account");
            return Err(DomainError::UnknownAccount.into());
        }

        let transaction =
            Transaction::record(req.account_id, operation_type, req.amount, self.clock.utc());

        self.transactions
            .create_transaction(&transaction)
            .await
            .map_err(storage_failure("create_transaction"))?;

        tracing::info!(
            transaction_id = %transaction.id,
            operation_type = %transaction.operation_type,
            "transaction recorded"
        );
        Ok(CreateTransactionResponse {
            transaction_id: transaction.id,
        })
    }
}
