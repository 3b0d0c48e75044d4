//! Request logging, optional global rate limiting and panic recovery.

use crate::error::ApiError;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{any::Any, num::NonZeroU32, sync::Arc, time::Instant};
use tracing::{debug, error, info, warn};

/// Global rate limiter (not keyed by client).
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter shared across requests. `None` lets every request through.
#[derive(Clone, Default)]
pub struct RateLimitState {
    limiter: Option<Arc<GlobalLimiter>>,
}

impl RateLimitState {
    /// Allow `requests_per_minute` across all clients; zero disables limiting.
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            limiter: NonZeroU32::new(requests_per_minute)
                .map(|rpm| Arc::new(RateLimiter::direct(Quota::per_minute(rpm)))),
        }
    }

    /// No limit at all.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Take one request from the quota.
    pub fn try_acquire(&self) -> Result<(), ApiError> {
        match &self.limiter {
            Some(limiter) => limiter.check().map_err(|_| ApiError::RateLimitExceeded),
            None => Ok(()),
        }
    }
}

/// Reject requests with 429 once the global quota is exhausted.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(e) = rate_limit.try_acquire() {
        warn!(uri = %request.uri(), "Global rate limit exceeded");
        return Err(e);
    }

    Ok(next.run(request).await)
}

/// Log each request with its matched route, status and latency.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "<unmatched>".to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(%method, %uri, %route, %status, elapsed_ms, "Request failed");
    } else if status.is_success() {
        info!(%method, %uri, %route, %status, elapsed_ms, "Request completed");
    } else {
        debug!(%method, %uri, %route, %status, elapsed_ms, "Request rejected");
    }

    response
}

/// Turn a handler panic into a 500 carrying the panic message.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!(%message, "Handler panicked");
    ApiError::Internal(message).into_response()
}
