//! Transaction domain model and the operation-type sign rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountId;
use crate::error::DomainError;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Creates a new random TransactionId.
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

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of monetary event, which fixes the polarity of its amount.
///
/// Parsed case-insensitively from the wire (`"cash purchase"`) and stored
/// upper-cased (`"CASH PURCHASE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    #[serde(rename = "CASH PURCHASE")]
    CashPurchase,
    #[serde(rename = "INSTALLMENT PURCHASE")]
    InstallmentPurchase,
    #[serde(rename = "WITHDRAWAL")]
    Withdrawal,
    #[serde(rename = "PAYMENT")]
    Payment,
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::CashPurchase,
        OperationType::InstallmentPurchase,
        OperationType::Withdrawal,
        OperationType::Payment,
    ];

    /// Lower-case wire name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            OperationType::CashPurchase => "cash purchase",
            OperationType::InstallmentPurchase => "installment purchase",
            OperationType::Withdrawal => "withdrawal",
            OperationType::Payment => "payment",
        }
    }

    /// Upper-case storage name.
    pub fn stored_name(&self) -> &'static str {
        match self {
            OperationType::CashPurchase => "CASH PURCHASE",
            OperationType::InstallmentPurchase => "INSTALLMENT PURCHASE",
            OperationType::Withdrawal => "WITHDRAWAL",
            OperationType::Payment => "PAYMENT",
        }
    }

    /// Returns true if money leaves the account (amount must be negative).
    pub fn is_debit(&self) -> bool {
        !matches!(self, OperationType::Payment)
    }

    /// Checks that `amount` has the polarity this operation requires.
    ///
    /// Zero is rejected for every operation type.
    pub fn validate_amount(&self, amount: f64) -> Result<(), DomainError> {
        if self.is_debit() {
            if amount < 0.0 {
                Ok(())
            } else {
                Err(DomainError::AmountMustBeNegative)
            }
        } else if amount > 0.0 {
            Ok(())
        } else {
            Err(DomainError::AmountMustBePositive)
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stored_name())
    }
}

impl std::str::FromStr for OperationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        OperationType::ALL
            .into_iter()
            .find(|op| op.wire_name() == lowered)
            .ok_or(DomainError::InvalidOperationType)
    }
}

/// Validates an operation type / amount pair as received from a caller.
///
/// An unknown operation type is reported before any amount check.
pub fn validate_transaction_rules(
    operation_type: &str,
    amount: f64,
) -> Result<OperationType, DomainError> {
    let op: OperationType = operation_type.parse()?;
    op.validate_amount(amount)?;
    Ok(op)
}

/// A recorded monetary event against one account.
///
/// Transactions are append-only: once created they are never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub operation_type: OperationType,
    /// Signed amount; polarity matches `operation_type`
    pub amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Transaction {
    /// Records a new transaction stamped at `now`.
    ///
    /// Callers are expected to have run [`validate_transaction_rules`] first.
    pub fn record(
        account_id: AccountId,
        operation_type: OperationType,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let millis = now.timestamp_millis();
        Self {
            id: TransactionId::new(),
            account_id,
            operation_type,
            amount,
            created_at: millis,
            updated_at: millis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Cash Purchase".parse::<OperationType>().unwrap(),
            OperationType::CashPurchase
        );
        assert_eq!(
            "INSTALLMENT PURCHASE".parse::<OperationType>().unwrap(),
            OperationType::InstallmentPurchase
        );
        assert_eq!(
            "withdrawal".parse::<OperationType>().unwrap(),
            OperationType::Withdrawal
        );
        assert_eq!(
            "PayMent".parse::<OperationType>().unwrap(),
            OperationType::Payment
        );
    }

    #[test]
    fn test_parse_unknown_operation_type() {
        for input in ["refund", "", "cash-purchase", " payment"] {
            assert!(matches!(
                input.parse::<OperationType>(),
                Err(DomainError::InvalidOperationType)
            ));
        }
    }

    #[test]
    fn test_debits_require_negative_amount() {
        for op in [
            OperationType::CashPurchase,
            OperationType::InstallmentPurchase,
            OperationType::Withdrawal,
        ] {
            assert!(op.validate_amount(-0.01).is_ok());
            assert!(matches!(
                op.validate_amount(0.0),
                Err(DomainError::AmountMustBeNegative)
            ));
            assert!(matches!(
                op.validate_amount(10.0),
                Err(DomainError::AmountMustBeNegative)
            ));
        }
    }

    #[test]
    fn test_payment_requires_positive_amount() {
        assert!(OperationType::Payment.validate_amount(100.5).is_ok());
        assert!(matches!(
            OperationType::Payment.validate_amount(0.0),
            Err(DomainError::AmountMustBePositive)
        ));
        assert!(matches!(
            OperationType::Payment.validate_amount(-1.0),
            Err(DomainError::AmountMustBePositive)
        ));
    }

    #[test]
    fn test_invalid_operation_type_wins_over_amount() {
        let result = validate_transaction_rules("transfer", -10.0);
        assert!(matches!(result, Err(DomainError::InvalidOperationType)));
        let result = validate_transaction_rules("transfer", 10.0);
        assert!(matches!(result, Err(DomainError::InvalidOperationType)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DomainError::AmountMustBeNegative.to_string(),
            "amount must be negative for purchases and withdrawals"
        );
        assert_eq!(
            DomainError::AmountMustBePositive.to_string(),
            "amount must be positive for payments"
        );
        assert_eq!(
            DomainError::InvalidOperationType.to_string(),
            "invalid operation type"
        );
    }

    #[test]
    fn test_operation_type_serializes_upper_case() {
        let json = serde_json::to_string(&OperationType::CashPurchase).unwrap();
        assert_eq!(json, "\"CASH PURCHASE\"");
        assert_eq!(OperationType::InstallmentPurchase.to_string(), "INSTALLMENT PURCHASE");
    }
}
