//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter port for different backends.
//!
//! ## Available Adapters
//!
//! - `RateLimiterStore` - In-memory, for tests and a single server instance
//! - `RedisRateLimiter` - Redis-backed, for several replicas behind a load balancer
//!
//! The in-memory store keeps one counter table per process. Behind a load
//! balancer each replica would enforce its own allowance, so a client could
//! get `replicas × max_requests` through. Use the Redis adapter there.
//!
//! ## Usage
//!
//! ```ignore
//! use finanwas::adapters::rate_limiter::{RateLimiterStore, DEFAULT_SWEEP_INTERVAL};
//! use finanwas::ports::{RateLimitKey, RateLimitPolicy, RateLimiter};
//!
//! let store = RateLimiterStore::new();
//! store.start_sweeper(DEFAULT_SWEEP_INTERVAL);
//!
//! let key = RateLimitKey::new("203.0.113.7", "login");
//! let result = store.check(&key, RateLimitPolicy::login()).await?;
//! ```

mod config;
mod in_memory;
mod redis;

pub use config::{
    RateLimitPolicies, ENDPOINT_API, ENDPOINT_INVESTOR_CLASSIFY, ENDPOINT_LOGIN,
    ENDPOINT_REGISTER, ENDPOINT_TWO_FACTOR,
};
pub use in_memory::{RateLimiterStore, DEFAULT_SWEEP_INTERVAL};
pub use redis::RedisRateLimiter;
