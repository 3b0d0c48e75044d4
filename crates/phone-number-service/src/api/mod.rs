//! HTTP API for the phone number service.

mod envelope;
mod handlers;
mod middleware;
mod types;

pub use envelope::*;
pub use handlers::*;
pub use middleware::{logging_middleware, panic_response, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::config::Config;
use crate::registry::Registry;
use axum::{
    middleware as axum_middleware,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Customer phone number registry
    pub registry: Arc<RwLock<Registry>>,
    /// Origin plus context path used for self links
    pub base_url: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: Registry, base_url: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            base_url: Arc::from(base_url.into()),
        }
    }

    /// Create application state from loaded configuration.
    pub fn from_config(registry: Registry, config: &Config) -> Self {
        Self::new(registry, config.base_url())
    }
}

/// Create the API router with routes mounted at the root.
pub fn create_router(state: AppState) -> Router {
    create_router_with_options(state, "", RateLimitState::disabled())
}

/// Create the API router with routes mounted under `context_path`.
///
/// `context_path` must be empty or start with `/` and have no trailing slash.
pub fn create_router_with_options(
    state: AppState,
    context_path: &str,
    rate_limit: RateLimitState,
) -> Router {
    let api = Router::new()
        .route("/phone-numbers", get(handlers::get_all_phone_numbers))
        .route(
            "/customers/:customer_id/phone-numbers",
            get(handlers::get_customer_phone_numbers),
        )
        .route(
            "/customers/:customer_id/phone-numbers/:phone_number",
            patch(handlers::activate_phone_number),
        );

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi));

    let router = if context_path.is_empty() {
        router.merge(api)
    } else {
        router.nest(context_path, api)
    };

    router
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum_middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
