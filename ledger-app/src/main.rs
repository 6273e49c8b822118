//! # Ledger Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Create the ledger services
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_hex::{
    LedgerServices,
    inbound::{HttpServer, RateLimiterState},
};
use ledger_repo::build_repo;
use ledger_types::SystemClock;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("ledger-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    let (telemetry, otel_provider) = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let (tracer, provider) = init_tracer(endpoint)?;
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(provider),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ledger_app=debug,ledger_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting ledger server on port {}", config.port);
    if otel_provider.is_none() {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, span export disabled");
    }

    // Connects and runs migrations
    let repo = build_repo(&config.database_url).await?;

    let services = LedgerServices::new(repo, Arc::new(SystemClock));
    let rate_limiter = RateLimiterState::per_minute(config.rate_limit_per_minute)
        .trust_forwarded_for(config.trust_forwarded_for);
    let server = HttpServer::with_rate_limiter(services, rate_limiter);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Flush pending spans before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
