//! Top-level router assembly.
//!
//! ```text
//! GET  /health                        liveness
//! POST /api/investor/classify         guarded by the `investor_classify` policy
//! GET  /api/rate-limit/:endpoint      quota peek, never counted
//! ```

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::adapters::rate_limiter::{RateLimitPolicies, ENDPOINT_INVESTOR_CLASSIFY};
use crate::ports::RateLimiter;

use super::investor::investor_routes;
use super::middleware::{rate_limit_middleware, RateLimitGuard};
use super::rate_limit::{rate_limit_routes, QuotaState};

/// Everything the HTTP surface needs from the composition root.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<dyn RateLimiter>,
    pub policies: RateLimitPolicies,
    pub rate_limiting_enabled: bool,
}

/// Build the application router. Cross-cutting layers (tracing, CORS,
/// timeouts) are added by the binary.
pub fn app_router(state: AppState) -> Router {
    let mut investor = investor_routes();
    if state.rate_limiting_enabled {
        let guard = RateLimitGuard::new(
            state.limiter.clone(),
            ENDPOINT_INVESTOR_CLASSIFY,
            state.policies.api,
        );
        investor = investor.layer(middleware::from_fn_with_state(guard, rate_limit_middleware));
    } else {
        tracing::warn!("Rate limiting disabled; investor routes are unguarded");
    }

    Router::new()
        .route("/health", get(health))
        .nest("/api/investor", investor)
        .nest(
            "/api/rate-limit",
            rate_limit_routes(QuotaState::new(state.limiter, state.policies)),
        )
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
