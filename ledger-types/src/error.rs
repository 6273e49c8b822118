//! Error types for the ledger service.

use crate::dto::{AdditionalData, ErrorResponse};

pub const BAD_REQUEST_CODE: &str = "ERR_CC_BAD_REQUEST";
pub const INTERNAL_SERVER_ERROR_CODE: &str = "ERR_CC_INTERNAL_SERVER_ERROR";
pub const ACCOUNT_NOT_PRESENT_CODE: &str = "ERR_CC_ACCOUNT_NOT_PRESENT";
pub const USER_ALREADY_EXIST_CODE: &str = "ERR_CC_USER_ALREADY_EXIST";

pub const INTERNAL_SERVER_ERROR_MSG: &str = "internal server error";
pub const ACCOUNT_NOT_PRESENT_MSG: &str = "account not present";
pub const USER_ALREADY_EXIST_MSG: &str = "user already exist with requested mobile number";

/// Domain-level errors (business rule and input shape violations).
///
/// Display strings are the exact wire messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid request body")]
    InvalidRequestBody,

    #[error("invalid mobile number")]
    InvalidMobileNumber,

    #[error("invalid operation type")]
    InvalidOperationType,

    #[error("amount must be negative for purchases and withdrawals")]
    AmountMustBeNegative,

    #[error("amount must be positive for payments")]
    AmountMustBePositive,

    #[error("accountId is missing in path params")]
    MissingAccountId,

    #[error("user does not exist with requested userId")]
    UnknownUser,

    #[error("account does not exist with requested accountId")]
    UnknownAccount,
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Closed taxonomy; each variant fixes its error code and HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("user already exist with requested mobile number")]
    Conflict,

    #[error("account not present")]
    NotFound,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    /// HTTP status for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::Conflict => 409,
            AppError::NotFound => 404,
            AppError::Internal => 500,
        }
    }

    /// Machine-readable error code.
    pub const fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => BAD_REQUEST_CODE,
            AppError::Conflict => USER_ALREADY_EXIST_CODE,
            AppError::NotFound => ACCOUNT_NOT_PRESENT_CODE,
            AppError::Internal => INTERNAL_SERVER_ERROR_CODE,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Storage detail never crosses the service boundary.
impl From<RepoError> for AppError {
    fn from(_: RepoError) -> Self {
        AppError::Internal
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error_code: err.error_code().to_string(),
            error_message: err.message(),
            additional_data: AdditionalData {
                status_code: err.status_code(),
            },
        }
    }
}
