//! In-memory rate limiter for single-instance deployments.
//!
//! Uses a fixed-window counter per `"{identifier}:{endpoint}"` key kept in a
//! process-local HashMap. State is lost on restart and is not shared between
//! replicas; run `RedisRateLimiter` when more than one instance serves traffic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::adapters::clock::SystemClock;
use crate::domain::foundation::Timestamp;
use crate::ports::{
    Clock, RateLimitError, RateLimitInfo, RateLimitKey, RateLimitPolicy, RateLimitResult,
    RateLimiter,
};

/// Default interval between sweeps of expired windows.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

type WindowMap = Arc<RwLock<HashMap<String, WindowState>>>;

/// In-memory rate limit store.
///
/// Each store owns its own window table, so independent instances never
/// share state. `check` performs its lookup and increment under a single
/// write lock.
pub struct RateLimiterStore {
    /// Per-key window state.
    windows: WindowMap,
    /// Time source for window arithmetic.
    clock: Arc<dyn Clock>,
    /// Background sweep task, if started.
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    /// Number of requests in the current window.
    count: u32,
    /// When the current window ends.
    reset_at: Timestamp,
}

impl RateLimiterStore {
    /// Create an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store on a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            clock,
            sweeper: Mutex::new(None),
        }
    }

    /// Spawn the background sweep, replacing any running one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_sweeper(&self, interval: Duration) {
        let interval = interval.max(Duration::from_millis(1));
        let windows = Arc::clone(&self.windows);
        let clock = Arc::clone(&self.clock);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = sweep(&windows, clock.now()).await;
                if removed > 0 {
                    tracing::debug!(removed, "swept expired rate limit windows");
                }
            }
        });

        if let Some(previous) = self.sweeper_slot().replace(handle) {
            previous.abort();
        }
        tracing::debug!(interval_ms = interval.as_millis() as u64, "rate limit sweeper started");
    }

    /// Remove every window whose reset time has passed.
    ///
    /// Returns the number of windows removed.
    pub async fn sweep_expired(&self) -> usize {
        sweep(&self.windows, self.clock.now()).await
    }

    /// Stop the background sweep. Tracked windows are kept.
    pub fn dispose(&self) {
        if let Some(handle) = self.sweeper_slot().take() {
            handle.abort();
            tracing::debug!("rate limit sweeper stopped");
        }
    }

    /// Whether a background sweep is currently running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper_slot()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Number of tracked windows, expired or not.
    pub async fn len(&self) -> usize {
        self.windows.read().await.len()
    }

    /// Whether no windows are tracked.
    pub async fn is_empty(&self) -> bool {
        self.windows.read().await.is_empty()
    }

    fn sweeper_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.sweeper
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn sweep(windows: &WindowMap, now: Timestamp) -> usize {
    let mut windows = windows.write().await;
    let before = windows.len();
    windows.retain(|_, state| !state.reset_at.is_before(&now));
    before - windows.len()
}

impl Default for RateLimiterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RateLimiterStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for RateLimiterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiterStore")
            .field("sweeping", &self.is_sweeping())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RateLimiter for RateLimiterStore {
    async fn check(
        &self,
        key: &RateLimitKey,
        policy: RateLimitPolicy,
    ) -> Result<RateLimitResult, RateLimitError> {
        let storage_key = key.storage_key();
        let limit = policy.max_requests;
        let now = self.clock.now();

        let mut windows = self.windows.write().await;

        // Existing window that has not expired yet
        if let Some(state) = windows.get_mut(&storage_key) {
            if !now.is_after(&state.reset_at) {
                state.count = state.count.saturating_add(1);
                let allowed = state.count <= limit;
                if !allowed {
                    tracing::debug!(key = %key, count = state.count, limit, "rate limit exceeded");
                }
                return Ok(RateLimitResult {
                    allowed,
                    limit,
                    remaining: limit.saturating_sub(state.count),
                    reset_ms: state.reset_at.millis_since(&now),
                    reset_at: state.reset_at,
                });
            }
        }

        // Absent or expired: start a fresh window
        let reset_at = now.plus_millis(policy.window_ms);
        windows.insert(storage_key, WindowState { count: 1, reset_at });

        Ok(RateLimitResult {
            allowed: true,
            limit,
            remaining: limit.saturating_sub(1),
            reset_ms: policy.window_ms,
            reset_at,
        })
    }

    async fn info(
        &self,
        key: &RateLimitKey,
        policy: RateLimitPolicy,
    ) -> Result<Option<RateLimitInfo>, RateLimitError> {
        let now = self.clock.now();
        let windows = self.windows.read().await;

        Ok(windows
            .get(&key.storage_key())
            .filter(|state| !now.is_after(&state.reset_at))
            .map(|state| RateLimitInfo {
                count: state.count,
                limit: policy.max_requests,
                remaining: policy.max_requests.saturating_sub(state.count),
                reset_ms: state.reset_at.millis_since(&now),
                reset_at: state.reset_at,
            }))
    }

    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError> {
        let mut windows = self.windows.write().await;
        windows.remove(&key.storage_key());
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), RateLimitError> {
        self.windows.write().await.clear();
        Ok(())
    }
}
