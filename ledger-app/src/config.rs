//! Configuration loading from environment.

use std::env;

use anyhow::Context;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Requests per minute allowed for each client.
    pub rate_limit_per_minute: u32,
    /// Key rate limits on `X-Forwarded-For`; only safe behind a proxy.
    pub trust_forwarded_for: bool,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid PORT: {v}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let rate_limit_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid RATE_LIMIT_PER_MINUTE: {v}"))?,
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
        };

        let trust_forwarded_for = match lookup("TRUST_FORWARDED_FOR") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("invalid TRUST_FORWARDED_FOR: {v}"))?,
            None => false,
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            database_url,
            rate_limit_per_minute,
            trust_forwarded_for,
            otlp_endpoint,
        })
    }
}
