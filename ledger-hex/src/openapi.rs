//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use ledger_types::dto::{
    AdditionalData, CreateAccountRequest, CreateAccountResponse, CreateTransactionRequest,
    CreateTransactionResponse, CreateUserRequest, CreateUserResponse, ErrorResponse,
    GetAccountResponse,
};
use utoipa::OpenApi;

// Stand-ins for the real (generic) handlers; utoipa only reads the attributes.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Register a user
#[utoipa::path(
    post,
    path = "/api/credit-card-api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Invalid request body or mobile number", body = ErrorResponse),
        (status = 409, description = "Mobile number already registered", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_user() {}

/// Open an account for an existing user
#[utoipa::path(
    post,
    path = "/api/credit-card-api/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = CreateAccountResponse),
        (status = 400, description = "Invalid request body or unknown user", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_account() {}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/api/credit-card-api/v1/accounts/{accountId}",
    tag = "accounts",
    params(
        ("accountId" = String, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details", body = GetAccountResponse),
        (status = 400, description = "Account ID missing", body = ErrorResponse),
        (status = 404, description = "Account not present", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn get_account() {}

/// Record a transaction
#[utoipa::path(
    post,
    path = "/api/credit-card-api/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = CreateTransactionResponse),
        (status = 400, description = "Invalid operation type, amount sign, or unknown account", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_transaction() {}

/// OpenAPI documentation for the ledger API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credit Card Ledger API",
        version = "1.0.0",
        description = "Registers users, opens accounts and records signed transactions against them.\n\nPurchases and withdrawals carry negative amounts; payments carry positive amounts.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_user,
        create_account,
        get_account,
        create_transaction,
    ),
    components(
        schemas(
            CreateUserRequest,
            CreateUserResponse,
            CreateAccountRequest,
            CreateAccountResponse,
            GetAccountResponse,
            CreateTransactionRequest,
            CreateTransactionResponse,
            ErrorResponse,
            AdditionalData,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User registration"),
        (name = "accounts", description = "Account management operations"),
        (name = "transactions", description = "Purchases, withdrawals and payments"),
    )
)]
pub struct ApiDoc;
