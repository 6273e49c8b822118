//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountId, TransactionId, UserId, is_valid_email, is_valid_mobile_number};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// User DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "John Deo")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "john.deo@xyz.com")]
    pub email: Option<String>,
    /// Country code +91 followed by a ten digit number starting with 6-9
    #[schema(example = "+919825212345")]
    pub mobile_number: String,
}

impl CreateUserRequest {
    /// Presence and shape checks performed before the request reaches the service.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.mobile_number.is_empty() {
            return Err(DomainError::InvalidRequestBody);
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !is_valid_email(email) {
                return Err(DomainError::InvalidRequestBody);
            }
        }
        if !is_valid_mobile_number(&self.mobile_number) {
            return Err(DomainError::InvalidMobileNumber);
        }
        Ok(())
    }
}

/// Response after registering a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    #[schema(value_type = String, example = "92d68c0e-dafe-406a-a0f2-8faae2020947")]
    pub user_id: UserId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to open an account for an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[schema(value_type = String, example = "92d68c0e-dafe-406a-a0f2-8faae2020947")]
    pub user_id: UserId,
    #[schema(example = "0987654321")]
    pub document_number: String,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.as_str().trim().is_empty() || self.document_number.trim().is_empty() {
            return Err(DomainError::InvalidRequestBody);
        }
        Ok(())
    }
}

/// Response after opening an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    #[schema(value_type = String, example = "92d68c0e-dafe-406a-a0f2-8faae2020947")]
    pub account_id: AccountId,
    #[schema(example = "0987654321")]
    pub document_number: String,
}

/// Account as returned by a read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountResponse {
    #[schema(value_type = String, example = "92d68c0e-dafe-406a-a0f2-8faae2020947")]
    pub account_id: AccountId,
    #[schema(value_type = String, example = "92d68c0e-dafe-406a-a0f2-8faae2020947")]
    pub user_id: UserId,
    #[schema(example = "0987654321")]
    pub document_number: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a transaction against an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[schema(value_type = String, example = "92d68c0e-dafe-406a-a0f2-8faae2020947")]
    pub account_id: AccountId,
    /// One of: cash purchase, installment purchase, withdrawal, payment (any case)
    #[serde(default)]
    #[schema(example = "cash purchase")]
    pub operation_type: String,
    /// Negative for purchases and withdrawals, positive for payments
    #[serde(default)]
    #[schema(example = json!(-123.45))]
    pub amount: f64,
}

impl CreateTransactionRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.account_id.as_str().trim().is_empty() {
            return Err(DomainError::InvalidRequestBody);
        }
        Ok(())
    }
}

/// Response after recording a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionResponse {
    #[schema(value_type = String, example = "82dfa288-28b5-430f-9b54-a4f99e546a40")]
    pub transaction_id: TransactionId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = "ERR_CC_BAD_REQUEST")]
    pub error_code: String,
    #[schema(example = "invalid request body")]
    pub error_message: String,
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalData {
    #[schema(example = 400)]
    pub status_code: u16,
}
