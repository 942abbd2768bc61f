//! Rate limiting middleware for axum.
//!
//! Each guarded route group gets a [`RateLimitGuard`] naming the logical
//! endpoint and its policy. The middleware counts the request against
//! `(client identifier, endpoint)` through the `RateLimiter` port.
//!
//! Rate limit status is returned in standard HTTP headers:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: Seconds to wait (only on 429 response)
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::post, middleware};
//!
//! let guard = RateLimitGuard::new(limiter, ENDPOINT_LOGIN, RateLimitPolicy::login());
//!
//! let app = Router::new()
//!     .route("/api/auth/login", post(login))
//!     .layer(middleware::from_fn_with_state(guard, rate_limit_middleware));
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::client_identifier::client_identifier_or_peer;
use crate::domain::foundation::ErrorCode;
use crate::ports::{RateLimitKey, RateLimitPolicy, RateLimitResult, RateLimiter};

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Middleware state: which limiter, which endpoint, which allowance.
#[derive(Clone)]
pub struct RateLimitGuard {
    limiter: Arc<dyn RateLimiter>,
    endpoint: &'static str,
    policy: RateLimitPolicy,
}

impl RateLimitGuard {
    /// Create a guard for one logical endpoint.
    pub fn new(limiter: Arc<dyn RateLimiter>, endpoint: &'static str, policy: RateLimitPolicy) -> Self {
        Self {
            limiter,
            endpoint,
            policy,
        }
    }

    /// The endpoint name requests are counted under.
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}

/// Rate limiting middleware.
///
/// This middleware:
/// 1. Identifies the client from proxy headers, then the socket address
/// 2. Counts the request against the guard's endpoint
/// 3. Returns 429 Too Many Requests when the window is exhausted
/// 4. Adds rate limit headers to allowed responses
///
/// If the limiter backend fails the request is let through.
pub async fn rate_limit_middleware(
    State(guard): State<RateLimitGuard>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let identifier =
        client_identifier_or_peer(request.headers(), connect_info.map(|ConnectInfo(addr)| addr));
    let key = RateLimitKey::new(identifier, guard.endpoint);

    match guard.limiter.check(&key, guard.policy).await {
        Ok(result) if result.is_denied() => {
            tracing::info!(
                key = %key,
                retry_after_secs = result.retry_after_secs(),
                "request rejected by rate limit"
            );
            rate_limit_response(&result)
        }
        Ok(result) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(&mut response, &result);
            response
        }
        Err(e) => {
            // Continue on error - fail open for availability
            tracing::warn!(endpoint = guard.endpoint, "Rate limiter unavailable: {}", e);
            next.run(request).await
        }
    }
}

/// Create a 429 Too Many Requests response.
pub fn rate_limit_response(result: &RateLimitResult) -> Response {
    let retry_after_secs = result.retry_after_secs();
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({
            "error_code": ErrorCode::RateLimited.as_str(),
            "message": format!(
                "Demasiadas solicitudes. Intenta de nuevo en {} segundos.",
                retry_after_secs
            ),
            "retry_after_secs": retry_after_secs
        })),
    )
        .into_response();

    add_rate_limit_headers(&mut response, result);
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));

    response
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(response: &mut Response, result: &RateLimitResult) {
    let headers = response.headers_mut();
    headers.insert(
        headers::X_RATELIMIT_LIMIT.clone(),
        HeaderValue::from(result.limit),
    );
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from(result.remaining),
    );
    headers.insert(
        headers::X_RATELIMIT_RESET.clone(),
        HeaderValue::from(result.reset_at.as_unix_secs()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rate_limiter::RateLimiterStore;
    use crate::domain::foundation::Timestamp;
    use crate::ports::{RateLimitError, RateLimitInfo};
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use tower::ServiceExt;

    struct UnavailableLimiter;

    #[async_trait]
    impl RateLimiter for UnavailableLimiter {
        async fn check(
            &self,
            _key: &RateLimitKey,
            _policy: RateLimitPolicy,
        ) -> Result<RateLimitResult, RateLimitError> {
            Err(RateLimitError::Unavailable("connection refused".to_string()))
        }

        async fn info(
            &self,
            _key: &RateLimitKey,
            _policy: RateLimitPolicy,
        ) -> Result<Option<RateLimitInfo>, RateLimitError> {
            Err(RateLimitError::Unavailable("connection refused".to_string()))
        }

        async fn reset(&self, _key: &RateLimitKey) -> Result<(), RateLimitError> {
            Ok(())
        }

        async fn clear_all(&self) -> Result<(), RateLimitError> {
            Ok(())
        }
    }

    fn guarded_app(limiter: Arc<dyn RateLimiter>, policy: RateLimitPolicy) -> Router {
        let guard = RateLimitGuard::new(limiter, "test", policy);
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(guard, rate_limit_middleware))
    }

    fn request_from(ip: &str) -> Request<Body> {
        Request::builder()
            .uri("/")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    fn denied_result(reset_ms: u64) -> RateLimitResult {
        RateLimitResult {
            allowed: false,
            limit: 5,
            remaining: 0,
            reset_ms,
            reset_at: Timestamp::from_unix_millis(1_700_000_030_000),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Response Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn rate_limit_response_has_429_status() {
        let response = rate_limit_response(&denied_result(30_000));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn rate_limit_response_has_retry_after_header() {
        let response = rate_limit_response(&denied_result(29_500));
        let retry_after = response.headers().get("Retry-After").unwrap();
        assert_eq!(retry_after, "30");
    }

    #[test]
    fn rate_limit_response_has_limit_headers() {
        let response = rate_limit_response(&denied_result(1_000));
        assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "5");
        assert_eq!(response.headers().get("x-ratelimit-remaining").unwrap(), "0");
        assert_eq!(
            response.headers().get("x-ratelimit-reset").unwrap(),
            "1700000030"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn allowed_requests_carry_quota_headers() {
        let policy = RateLimitPolicy::new(3, 60_000).unwrap();
        let app = guarded_app(Arc::new(RateLimiterStore::new()), policy);

        let response = app.oneshot(request_from("1.2.3.4")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "3");
        assert_eq!(response.headers().get("x-ratelimit-remaining").unwrap(), "2");
    }

    #[tokio::test]
    async fn exhausted_quota_returns_429() {
        let policy = RateLimitPolicy::new(2, 60_000).unwrap();
        let app = guarded_app(Arc::new(RateLimiterStore::new()), policy);

        for _ in 0..2 {
            let response = app.clone().oneshot(request_from("1.2.3.4")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.clone().oneshot(request_from("1.2.3.4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("retry-after"));

        // A different client is unaffected
        let response = app.oneshot(request_from("5.6.7.8")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn backend_failure_fails_open() {
        let app = guarded_app(Arc::new(UnavailableLimiter), RateLimitPolicy::login());

        let response = app.oneshot(request_from("1.2.3.4")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key("x-ratelimit-limit"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Type Safety Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn rate_limit_guard_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RateLimitGuard>();
    }
}
