//! # Ledger Client SDK
//!
//! A typed Rust client for the ledger API.

use ledger_types::{
    AccountId, CreateAccountRequest, CreateAccountResponse, CreateTransactionRequest,
    CreateTransactionResponse, CreateUserRequest, CreateUserResponse, ErrorResponse,
    GetAccountResponse, UserId,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Path prefix of every API route.
pub const API_PREFIX: &str = "/api/credit-card-api/v1";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} {error_code} - {message}")]
    Api {
        status: u16,
        error_code: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ledger API client.
pub struct LedgerClient {
    base_url: String,
    http: Client,
}

impl LedgerClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Registers a user.
    pub async fn create_user(
        &self,
        name: Option<String>,
        email: Option<String>,
        mobile_number: &str,
    ) -> Result<CreateUserResponse, ClientError> {
        let req = CreateUserRequest {
            name,
            email,
            mobile_number: mobile_number.to_string(),
        };
        self.post("/users", &req).await
    }

    /// Opens an account for an existing user.
    pub async fn create_account(
        &self,
        user_id: UserId,
        document_number: &str,
    ) -> Result<CreateAccountResponse, ClientError> {
        let req = CreateAccountRequest {
            user_id,
            document_number: document_number.to_string(),
        };
        self.post("/accounts", &req).await
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: &AccountId) -> Result<GetAccountResponse, ClientError> {
        self.get(&format!("/accounts/{}", id)).await
    }

    /// Records a transaction.
    ///
    /// `operation_type` is sent as given; the server matches it case-insensitively.
    pub async fn create_transaction(
        &self,
        account_id: AccountId,
        operation_type: &str,
        amount: f64,
    ) -> Result<CreateTransactionResponse, ClientError> {
        let req = CreateTransactionRequest {
            account_id,
            operation_type: operation_type.to_string(),
            amount,
        };
        self.post("/transactions", &req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(path)).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status.as_u16(), body))
        }
    }
}

/// Builds an `Api` error from a failed response, falling back to the raw
/// body when it is not an `ErrorResponse`.
fn api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => ClientError::Api {
            status,
            error_code: err.error_code,
            message: err.error_message,
        },
        Err(_) => ClientError::Api {
            status,
            error_code: String::new(),
            message: body,
        },
    }
}
