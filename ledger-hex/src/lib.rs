//! # Ledger Hex
//!
//! Application service layer and HTTP adapter for the ledger service.
//!
//! ## Architecture
//!
//! - `service/` - Application services (orchestrate domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - Swagger document served next to the API
//!
//! Services are generic over the repository ports, so any adapter that
//! implements `UserRepository + AccountRepository + TransactionRepository`
//! can be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{
    AccountService, LedgerRepository, LedgerServices, TransactionService, UserService,
};
