//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - Wall clock and a manually advanced test clock
//! - `rate_limiter` - Request counters (in-memory, Redis)
//! - `http` - axum routes, handlers and middleware

pub mod clock;
pub mod http;
pub mod rate_limiter;

pub use clock::{ManualClock, SystemClock};
pub use rate_limiter::{RateLimitPolicies, RateLimiterStore, RedisRateLimiter};
