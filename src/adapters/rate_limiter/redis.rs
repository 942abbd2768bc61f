//! Redis-backed rate limiter for multi-instance deployments.
//!
//! Uses the same fixed-window counter as the in-memory store, with the
//! window kept in Redis so every replica sees one count per key.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitError, RateLimitInfo, RateLimitKey, RateLimitPolicy, RateLimitResult, RateLimiter,
    REDIS_KEY_PREFIX,
};

/// Redis-backed rate limiter.
///
/// Uses a fixed-window counter algorithm:
/// 1. INCR the key to increment the counter
/// 2. If count is 1, set PEXPIRE for the window duration
/// 3. If count > limit, deny the request
///
/// INCR is atomic, so concurrent replicas never lose an increment. A key
/// left without expiry (process died between INCR and PEXPIRE) gets its
/// expiry re-armed on the next check.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: MultiplexedConnection,
}

impl RedisRateLimiter {
    /// Create a new Redis rate limiter.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a multiplexed connection to `url` and wrap it.
    pub async fn connect(url: &str) -> Result<Self, RateLimitError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn))
    }
}

fn unavailable(e: redis::RedisError) -> RateLimitError {
    RateLimitError::Unavailable(e.to_string())
}

/// Window length as a PEXPIRE argument. Values past `i64::MAX` are
/// clamped; a wrapped negative expiry would delete the key.
fn pexpire_millis(window_ms: u64) -> i64 {
    i64::try_from(window_ms).unwrap_or(i64::MAX)
}

/// Remaining window in ms from a PTTL reply, falling back to the full window.
fn remaining_window_ms(pttl: i64, window_ms: u64) -> u64 {
    if pttl > 0 {
        pttl as u64
    } else {
        window_ms
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(
        &self,
        key: &RateLimitKey,
        policy: RateLimitPolicy,
    ) -> Result<RateLimitResult, RateLimitError> {
        let redis_key = key.to_redis_key();
        let limit = policy.max_requests;
        let window_ms = pexpire_millis(policy.window_ms);

        let mut conn = self.conn.clone();

        // Atomic increment
        let count: i64 = conn.incr(&redis_key, 1_i64).await.map_err(unavailable)?;

        // Set expiry on first request in window
        if count == 1 {
            conn.pexpire::<_, ()>(&redis_key, window_ms)
                .await
                .map_err(unavailable)?;
        }

        // Get TTL for reset time
        let mut pttl: i64 = conn.pttl(&redis_key).await.map_err(unavailable)?;
        if pttl == -1 {
            tracing::warn!(key = %key, "rate limit key had no expiry; re-arming");
            conn.pexpire::<_, ()>(&redis_key, window_ms)
                .await
                .map_err(unavailable)?;
            pttl = window_ms;
        }

        let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        let reset_ms = remaining_window_ms(pttl, policy.window_ms);
        let allowed = count <= limit;
        if !allowed {
            tracing::debug!(key = %key, count, limit, "rate limit exceeded");
        }

        Ok(RateLimitResult {
            allowed,
            limit,
            remaining: limit.saturating_sub(count),
            reset_ms,
            reset_at: Timestamp::now().plus_millis(reset_ms),
        })
    }

    async fn info(
        &self,
        key: &RateLimitKey,
        policy: RateLimitPolicy,
    ) -> Result<Option<RateLimitInfo>, RateLimitError> {
        let redis_key = key.to_redis_key();
        let mut conn = self.conn.clone();

        // Get current count (absent once the window expired)
        let count: Option<i64> = conn.get(&redis_key).await.map_err(unavailable)?;
        let Some(count) = count else {
            return Ok(None);
        };

        let pttl: i64 = conn.pttl(&redis_key).await.map_err(unavailable)?;
        let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        let reset_ms = remaining_window_ms(pttl, policy.window_ms);

        Ok(Some(RateLimitInfo {
            count,
            limit: policy.max_requests,
            remaining: policy.max_requests.saturating_sub(count),
            reset_ms,
            reset_at: Timestamp::now().plus_millis(reset_ms),
        }))
    }

    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError> {
        let redis_key = key.to_redis_key();
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(&redis_key).await.map_err(unavailable)?;

        Ok(())
    }

    async fn clear_all(&self) -> Result<(), RateLimitError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", REDIS_KEY_PREFIX);

        let keys: Vec<String> = {
            let mut iter = conn
                .scan_match::<_, String>(&pattern)
                .await
                .map_err(unavailable)?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if !keys.is_empty() {
            conn.del::<_, ()>(&keys).await.map_err(unavailable)?;
            tracing::info!(removed = keys.len(), "cleared rate limit windows");
        }

        Ok(())
    }
}

impl std::fmt::Debug for RedisRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_window_uses_pttl_when_positive() {
        assert_eq!(remaining_window_ms(12_345, 60_000), 12_345);
    }

    #[test]
    fn remaining_window_falls_back_for_missing_or_persistent_keys() {
        // -2: key does not exist, -1: key has no expiry
        assert_eq!(remaining_window_ms(-2, 60_000), 60_000);
        assert_eq!(remaining_window_ms(-1, 60_000), 60_000);
        assert_eq!(remaining_window_ms(0, 60_000), 60_000);
    }

    #[test]
    fn pexpire_argument_never_wraps_negative() {
        assert_eq!(pexpire_millis(60_000), 60_000);
        assert_eq!(pexpire_millis(u64::MAX), i64::MAX);
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let result = RedisRateLimiter::connect("not a url").await;
        assert!(matches!(result, Err(RateLimitError::Unavailable(_))));
    }

    // Redis integration tests require a running Redis instance
    // and are run separately from unit tests.
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn redis_rate_limiter_counts_per_window() {
        let limiter = RedisRateLimiter::connect("redis://127.0.0.1/").await.unwrap();
        let key = RateLimitKey::new("redis-test", "login");
        let policy = RateLimitPolicy::new(2, 60_000).unwrap();
        limiter.reset(&key).await.unwrap();

        assert!(limiter.check(&key, policy).await.unwrap().is_allowed());
        assert!(limiter.check(&key, policy).await.unwrap().is_allowed());
        assert!(limiter.check(&key, policy).await.unwrap().is_denied());

        let info = limiter.info(&key, policy).await.unwrap().unwrap();
        assert_eq!(info.count, 3);

        limiter.reset(&key).await.unwrap();
        assert!(limiter.info(&key, policy).await.unwrap().is_none());
    }
}
