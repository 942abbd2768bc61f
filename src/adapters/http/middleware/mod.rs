//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `rate_limit` - Per-endpoint request throttling

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, rate_limit_response, RateLimitGuard};
