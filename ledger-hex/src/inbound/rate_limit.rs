//! Rate limiting middleware using Governor.
//!
//! Per-client token buckets keyed by the peer address. `X-Forwarded-For` is
//! only consulted when the server sits behind a trusted proxy. Buckets that
//! have fully replenished are swept periodically so idle clients do not
//! accumulate.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, StatusCode, header::RETRY_AFTER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use ledger_types::{AdditionalData, ErrorResponse};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};
use tokio::task::JoinHandle;

pub const TOO_MANY_REQUESTS_CODE: &str = "ERR_CC_TOO_MANY_REQUESTS";
pub const TOO_MANY_REQUESTS_MSG: &str = "too many requests";

/// Key used when the connection carries no peer address.
const UNKNOWN_PEER: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    period: Duration,
    /// Take the client from the first `X-Forwarded-For` hop
    trust_forwarded_for: bool,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Allows `requests` per `period` for each client, all of which may
    /// arrive as one burst. A zero request count is treated as one.
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            period,
            trust_forwarded_for: false,
        }
    }

    /// Allows `requests` per minute for each client.
    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Keys clients by the first `X-Forwarded-For` hop instead of the peer.
    /// Only enable this behind a proxy that overwrites the header.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, client: &IpAddr) -> bool {
        self.limiter.check_key(client).is_ok()
    }

    /// Drops buckets that have fully replenished.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }

    /// Sweeps idle buckets once per quota period until the task is aborted.
    pub fn spawn_cleanup(self: &Arc<Self>) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(state.period);
            loop {
                interval.tick().await;
                state.retain_recent();
                tracing::debug!(clients = state.len(), "rate limiter swept");
            }
        })
    }

    fn client_key(&self, request: &Request<Body>) -> IpAddr {
        if self.trust_forwarded_for {
            let forwarded = request
                .headers()
                .get("X-Forwarded-For")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse().ok());
            if let Some(ip) = forwarded {
                return ip;
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(UNKNOWN_PEER)
    }
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let key = limiter.client_key(&request);
    if limiter.check(&key) {
        return next.run(request).await;
    }

    tracing::warn!(client = %key, "rate limit exceeded");
    let body = ErrorResponse {
        error_code: TOO_MANY_REQUESTS_CODE.to_string(),
        error_message: TOO_MANY_REQUESTS_MSG.to_string(),
        additional_data: AdditionalData {
            status_code: StatusCode::TOO_MANY_REQUESTS.as_u16(),
        },
    };
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(limiter.period.as_secs()));
    response
}
