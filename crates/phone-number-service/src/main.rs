//! Phone Number Service - Entry point.

use phone_number_service::{
    api::{create_router_with_options, AppState, RateLimitState},
    config::Config,
    registry::Registry,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Phone Number Service");

    let registry = Registry::seeded();
    info!(
        customers = registry.customer_count(),
        phone_numbers = registry.number_count(),
        "Loaded seed registry"
    );

    let state = AppState::from_config(registry, &config);
    let rate_limit = RateLimitState::new(config.rate_limit.global_per_minute);
    if rate_limit.is_enabled() {
        info!(
            per_minute = config.rate_limit.global_per_minute,
            "Global rate limiting enabled"
        );
    }
    let context_path = config.server.normalized_context_path();
    let app = create_router_with_options(state, &context_path, rate_limit);

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!(%addr, base_url = %config.base_url(), "Listening");

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
