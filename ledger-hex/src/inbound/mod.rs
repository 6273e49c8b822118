//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod rate_limit;
mod server;

pub use rate_limit::{RateLimiterState, TOO_MANY_REQUESTS_CODE};
pub use server::{API_PREFIX, HttpServer};
