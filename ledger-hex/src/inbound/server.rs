//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::openapi::ApiDoc;
use crate::{LedgerRepository, LedgerServices};

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/credit-card-api/v1";

/// HTTP Server for the ledger API.
pub struct HttpServer<R: LedgerRepository> {
    state: Arc<AppState<R>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R: LedgerRepository> HttpServer<R> {
    /// Creates a new HTTP server with the default rate limit (100 req/min per client).
    pub fn new(services: LedgerServices<R>) -> Self {
        Self {
            state: Arc::new(AppState { services }),
            rate_limiter: Arc::new(RateLimiterState::default()),
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(services: LedgerServices<R>, requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(AppState { services }),
            rate_limiter: Arc::new(RateLimiterState::per_minute(requests_per_minute)),
        }
    }

    /// Creates a new HTTP server around a preconfigured rate limiter.
    pub fn with_rate_limiter(services: LedgerServices<R>, rate_limiter: RateLimiterState) -> Self {
        Self {
            state: Arc::new(AppState { services }),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Uses the globally set MeterProvider
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let api = Router::new()
            .route("/users", post(handlers::create_user::<R>))
            .route("/accounts", post(handlers::create_account::<R>))
            .route("/accounts/", get(handlers::missing_account_id))
            .route("/accounts/{accountId}", get(handlers::get_account::<R>))
            .route("/transactions", post(handlers::create_transaction::<R>))
            .with_state(self.state.clone());

        Router::new()
            .route("/health", get(handlers::health))
            .nest(API_PREFIX, api)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let cleanup = self.rate_limiter.spawn_cleanup();
        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;
        cleanup.abort();
        served?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
