//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RateLimiter` - Fixed-window request throttling per client and endpoint
//! - `Clock` - Current time, replaceable in tests

mod clock;
mod rate_limiter;

pub use clock::Clock;
pub use rate_limiter::{
    RateLimitError, RateLimitInfo, RateLimitKey, RateLimitPolicy, RateLimitResult, RateLimiter,
    REDIS_KEY_PREFIX,
};
