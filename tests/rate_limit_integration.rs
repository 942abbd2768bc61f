//! Integration tests for rate limiting over HTTP.
//!
//! These tests drive the full application router against an in-memory
//! store on a manual clock:
//! 1. Requests past the allowance get 429 with retry information
//! 2. The window resets once its duration has elapsed
//! 3. Clients are counted independently
//! 4. The quota endpoint reports usage without consuming it

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use finanwas::adapters::clock::ManualClock;
use finanwas::adapters::http::{app_router, AppState};
use finanwas::adapters::rate_limiter::{RateLimitPolicies, RateLimiterStore};
use finanwas::domain::foundation::Timestamp;
use finanwas::ports::RateLimitPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

const START_MS: i64 = 1_700_000_000_000;

struct TestApp {
    router: axum::Router,
    clock: Arc<ManualClock>,
}

impl TestApp {
    /// Classification allows `max_requests` per `window_ms`.
    fn new(max_requests: u32, window_ms: u64) -> Self {
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_millis(START_MS)));
        let store = RateLimiterStore::with_clock(clock.clone());
        let policies = RateLimitPolicies {
            api: RateLimitPolicy::new(max_requests, window_ms).unwrap(),
            ..RateLimitPolicies::default()
        };
        let router = app_router(AppState {
            limiter: Arc::new(store),
            policies,
            rate_limiting_enabled: true,
        });
        Self { router, clock }
    }

    async fn classify_from(&self, client: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/investor/classify")
                    .header("content-type", "application/json")
                    .header("x-forwarded-for", client)
                    .body(Body::from(r#"{"questionnaire_completed": false}"#))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn quota_for(&self, client: &str, endpoint: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/rate-limit/{}", endpoint))
                    .header("x-forwarded-for", client)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn header<'a>(response: &'a Response, name: &str) -> &'a str {
    response.headers()[name].to_str().unwrap()
}

// =============================================================================
// Enforcement
// =============================================================================

#[tokio::test]
async fn requests_beyond_allowance_are_rejected() {
    let app = TestApp::new(3, 60_000);

    for expected_remaining in ["2", "1", "0"] {
        let response = app.classify_from("198.51.100.1").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, "x-ratelimit-remaining"), expected_remaining);
    }

    let response = app.classify_from("198.51.100.1").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(header(&response, "retry-after"), "60");
    assert_eq!(header(&response, "x-ratelimit-remaining"), "0");

    let json = body_json(response).await;
    assert_eq!(json["error_code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(json["retry_after_secs"], 60);
}

#[tokio::test]
async fn retry_after_shrinks_as_the_window_runs_out() {
    let app = TestApp::new(1, 60_000);
    app.classify_from("198.51.100.2").await;

    app.clock.advance_millis(45_500);
    let response = app.classify_from("198.51.100.2").await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(header(&response, "retry-after"), "15");
}

#[tokio::test]
async fn window_resets_after_it_elapses() {
    let app = TestApp::new(2, 1_000);
    app.classify_from("198.51.100.3").await;
    app.classify_from("198.51.100.3").await;
    assert_eq!(
        app.classify_from("198.51.100.3").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    app.clock.advance_millis(1_001);
    let response = app.classify_from("198.51.100.3").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-ratelimit-remaining"), "1");
}

#[tokio::test]
async fn clients_are_counted_independently() {
    let app = TestApp::new(1, 60_000);

    assert_eq!(app.classify_from("198.51.100.4").await.status(), StatusCode::OK);
    assert_eq!(
        app.classify_from("198.51.100.4").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(app.classify_from("198.51.100.5").await.status(), StatusCode::OK);
}

// =============================================================================
// Quota inspection
// =============================================================================

#[tokio::test]
async fn quota_reflects_classification_traffic() {
    let app = TestApp::new(5, 60_000);
    app.classify_from("198.51.100.6").await;
    app.classify_from("198.51.100.6").await;

    let (status, json) = app.quota_for("198.51.100.6", "investor_classify").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["limit"], 5);
    assert_eq!(json["used"], 2);
    assert_eq!(json["remaining"], 3);
    assert_eq!(json["reset_ms"], 60_000);
}

#[tokio::test]
async fn quota_peek_does_not_consume_allowance() {
    let app = TestApp::new(1, 60_000);

    for _ in 0..5 {
        let (status, json) = app.quota_for("198.51.100.7", "investor_classify").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["remaining"], 1);
        assert!(json["reset_ms"].is_null());
    }

    assert_eq!(app.classify_from("198.51.100.7").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn quota_for_unknown_endpoint_is_not_found() {
    let app = TestApp::new(5, 60_000);

    let (status, json) = app.quota_for("198.51.100.8", "portfolio").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "ENDPOINT_NOT_FOUND");
}
