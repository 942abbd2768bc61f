//! HTTP routes for investor profiling.

use axum::{routing::post, Router};

use super::handlers::classify_investor;

/// Creates the investor router. Paths are relative to `/api/investor`.
pub fn investor_routes() -> Router {
    Router::new().route("/classify", post(classify_investor))
}
