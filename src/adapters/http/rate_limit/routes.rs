//! HTTP routes for quota inspection.

use axum::{routing::get, Router};

use super::handlers::{get_quota, QuotaState};

/// Creates the quota router. Paths are relative to `/api/rate-limit`.
pub fn rate_limit_routes(state: QuotaState) -> Router {
    Router::new()
        .route("/:endpoint", get(get_quota))
        .with_state(state)
}
