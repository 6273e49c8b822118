//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ledger_types::{
    AccountId, AppError, CreateAccountRequest, CreateTransactionRequest, CreateUserRequest,
    DomainError, ErrorResponse,
};

use crate::{LedgerRepository, LedgerServices};

/// Application state shared across handlers.
pub struct AppState<R: LedgerRepository> {
    pub services: LedgerServices<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err.into())
    }
}

/// Any body that fails to parse as the expected JSON shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        DomainError::InvalidRequestBody.into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Register a user.
#[tracing::instrument(skip_all)]
pub async fn create_user<R: LedgerRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let created = state.services.users.create_user(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Open an account for an existing user.
#[tracing::instrument(skip_all)]
pub async fn create_account<R: LedgerRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let created = state.services.accounts.create_account(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get account by ID.
#[tracing::instrument(skip(state), fields(account_id = %id))]
pub async fn get_account<R: LedgerRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if id.trim().is_empty() {
        return Err(DomainError::MissingAccountId.into());
    }

    let account = state.services.accounts.get_account(&AccountId::from(id)).await?;
    Ok(Json(account))
}

/// Record a transaction against an account.
#[tracing::instrument(skip_all)]
pub async fn create_transaction<R: LedgerRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let created = state.services.transactions.create_transaction(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /accounts/` with the id segment left out.
pub async fn missing_account_id() -> ApiError {
    DomainError::MissingAccountId.into()
}
