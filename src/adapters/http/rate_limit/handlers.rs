//! HTTP handlers for quota inspection.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::client_identifier::client_identifier_or_peer;
use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::rate_limiter::RateLimitPolicies;
use crate::domain::foundation::ErrorCode;
use crate::ports::{RateLimitKey, RateLimiter};

use super::dto::QuotaResponse;

/// State shared by the quota endpoints.
#[derive(Clone)]
pub struct QuotaState {
    limiter: Arc<dyn RateLimiter>,
    policies: RateLimitPolicies,
}

impl QuotaState {
    pub fn new(limiter: Arc<dyn RateLimiter>, policies: RateLimitPolicies) -> Self {
        Self { limiter, policies }
    }
}

/// GET /api/rate-limit/:endpoint - Peek at the caller's quota
///
/// Never consumes a request.
pub async fn get_quota(
    State(state): State<QuotaState>,
    Path(endpoint): Path<String>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Response {
    let Some(policy) = state.policies.for_endpoint(&endpoint) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                ErrorCode::EndpointNotFound,
                format!("Endpoint '{}' is not rate limited", endpoint),
            )),
        )
            .into_response();
    };

    let identifier = client_identifier_or_peer(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let key = RateLimitKey::new(identifier, endpoint.as_str());

    match state.limiter.info(&key, policy).await {
        Ok(info) => (
            StatusCode::OK,
            Json(QuotaResponse::new(&endpoint, policy, info)),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(key = %key, "Rate limiter unavailable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(ErrorCode::CacheError, e.to_string())),
            )
                .into_response()
        }
    }
}
