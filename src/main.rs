//! Finanwas API server.
//!
//! Loads configuration from `FINANWAS__*` environment variables, picks the
//! rate limiter backend and serves the HTTP API until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finanwas::adapters::http::{app_router, AppState};
use finanwas::adapters::rate_limiter::{RateLimiterStore, RedisRateLimiter};
use finanwas::config::{AppConfig, RateLimitBackend, ServerConfig};
use finanwas::ports::RateLimiter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        backend = ?config.rate_limit.backend,
        rate_limiting = config.features.enable_rate_limiting,
        "finanwas starting"
    );

    if config.has_single_instance_limits() {
        tracing::warn!(
            "In-memory rate limiting in production: each replica enforces its own limits. \
             Set FINANWAS__RATE_LIMIT__BACKEND=redis when running more than one instance."
        );
    }

    let limiter = build_limiter(&config).await?;
    let state = AppState {
        limiter,
        policies: config.rate_limit.policies()?,
        rate_limiting_enabled: config.features.enable_rate_limiting,
    };
    let app = with_layers(app_router(state), &config.server);

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.features.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_limiter(
    config: &AppConfig,
) -> Result<Arc<dyn RateLimiter>, Box<dyn std::error::Error>> {
    match config.rate_limit.backend {
        RateLimitBackend::Memory => {
            let store = RateLimiterStore::new();
            store.start_sweeper(config.rate_limit.sweep_interval());
            Ok(Arc::new(store))
        }
        RateLimitBackend::Redis => {
            let limiter = tokio::time::timeout(
                config.redis.timeout(),
                RedisRateLimiter::connect(&config.redis.url),
            )
            .await
            .map_err(|_| "timed out connecting to Redis")??;
            tracing::info!("Connected to Redis rate limit store");
            Ok(Arc::new(limiter))
        }
    }
}

fn with_layers(router: Router, server: &ServerConfig) -> Router {
    let origins = server.cors_origins_list();
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };
    let cors = CorsLayer::new().allow_origin(allow_origin);

    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
