//! Rate limiting port for protecting login, registration and API endpoints.
//!
//! This port defines the interface for fixed-window rate limiting keyed by
//! `(identifier, endpoint)`. Implementations can keep state in process
//! memory (single instance) or in Redis (shared across replicas).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe. The lookup-then-increment in
/// `check` must not lose updates under concurrent callers.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request against the key and report whether it is allowed.
    async fn check(
        &self,
        key: &RateLimitKey,
        policy: RateLimitPolicy,
    ) -> Result<RateLimitResult, RateLimitError>;

    /// Peek at the current window without consuming a request.
    ///
    /// Returns `None` when no window is active for the key.
    async fn info(
        &self,
        key: &RateLimitKey,
        policy: RateLimitPolicy,
    ) -> Result<Option<RateLimitInfo>, RateLimitError>;

    /// Reset rate limit for a key (admin operation).
    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError>;

    /// Drop every tracked window.
    async fn clear_all(&self) -> Result<(), RateLimitError>;
}

/// Key identifying what to rate limit: a client and the endpoint it hits.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Client identifier, usually the caller's IP address.
    pub identifier: String,
    /// Logical endpoint name (e.g., "login").
    pub endpoint: String,
}

impl RateLimitKey {
    /// Creates a key for a client on an endpoint.
    pub fn new(identifier: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Returns the in-process map key, `"{identifier}:{endpoint}"`.
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.identifier, self.endpoint)
    }

    /// Returns the Redis key string for this rate limit key.
    pub fn to_redis_key(&self) -> String {
        format!("{}{}", REDIS_KEY_PREFIX, self.storage_key())
    }
}

/// Prefix shared by all rate limit keys stored in Redis.
pub const REDIS_KEY_PREFIX: &str = "ratelimit:";

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

/// Allowance for one endpoint: `max_requests` per `window_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    /// Maximum requests allowed in one window.
    pub max_requests: u32,
    /// Window duration in milliseconds.
    pub window_ms: u64,
}

impl RateLimitPolicy {
    /// Creates a policy, rejecting zero values.
    pub fn new(max_requests: u32, window_ms: u64) -> Result<Self, ValidationError> {
        if max_requests == 0 {
            return Err(ValidationError::below_minimum("max_requests", 1, 0));
        }
        if window_ms == 0 {
            return Err(ValidationError::below_minimum("window_ms", 1, 0));
        }
        Ok(Self {
            max_requests,
            window_ms,
        })
    }

    /// 5 login attempts per minute.
    pub const fn login() -> Self {
        Self {
            max_requests: 5,
            window_ms: 60_000,
        }
    }

    /// 3 registrations per minute.
    pub const fn register() -> Self {
        Self {
            max_requests: 3,
            window_ms: 60_000,
        }
    }

    /// 5 TOTP verification attempts per minute.
    pub const fn two_factor() -> Self {
        Self {
            max_requests: 5,
            window_ms: 60_000,
        }
    }

    /// 100 general API requests per minute.
    pub const fn api() -> Self {
        Self {
            max_requests: 100,
            window_ms: 60_000,
        }
    }
}

/// Outcome of counting one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitResult {
    /// Whether the request fits in the current window.
    pub allowed: bool,
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Milliseconds until the window resets.
    pub reset_ms: u64,
    /// When the current window resets.
    pub reset_at: Timestamp,
}

impl RateLimitResult {
    /// Returns true if the request was allowed.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Returns true if the request was denied.
    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Whole seconds until retry, never less than one.
    pub fn retry_after_secs(&self) -> u64 {
        (self.reset_ms.saturating_add(999) / 1_000).max(1)
    }
}

/// Snapshot of an active window, as returned by [`RateLimiter::info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    /// Requests counted so far in the window.
    pub count: u32,
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Requests still available.
    pub remaining: u32,
    /// Milliseconds until the window resets.
    pub reset_ms: u64,
    /// When the current window resets.
    pub reset_at: Timestamp,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}
