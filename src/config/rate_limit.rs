//! Rate limiting configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::rate_limiter::RateLimitPolicies;
use crate::ports::RateLimitPolicy;

use super::error::ValidationError;

/// Where request counters live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Per-process table. Only correct for a single instance.
    #[default]
    Memory,
    /// Shared counters in Redis.
    Redis,
}

/// Rate limiting configuration
///
/// Every `*_max_requests` override is optional; unset values keep the
/// built-in preset. `window_ms` applies to all presets when set.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Counter storage backend
    #[serde(default)]
    pub backend: RateLimitBackend,

    /// Seconds between sweeps of expired in-memory windows
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    pub login_max_requests: Option<u32>,
    pub register_max_requests: Option<u32>,
    pub two_factor_max_requests: Option<u32>,
    pub api_max_requests: Option<u32>,
    pub window_ms: Option<u64>,
}

impl RateLimitConfig {
    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Build the policy table, applying overrides to the presets.
    pub fn policies(&self) -> Result<RateLimitPolicies, ValidationError> {
        let defaults = RateLimitPolicies::default();
        Ok(RateLimitPolicies {
            login: self.policy("login", defaults.login, self.login_max_requests)?,
            register: self.policy("register", defaults.register, self.register_max_requests)?,
            two_factor: self.policy(
                "two_factor",
                defaults.two_factor,
                self.two_factor_max_requests,
            )?,
            api: self.policy("api", defaults.api, self.api_max_requests)?,
        })
    }

    fn policy(
        &self,
        name: &'static str,
        preset: RateLimitPolicy,
        max_requests: Option<u32>,
    ) -> Result<RateLimitPolicy, ValidationError> {
        RateLimitPolicy::new(
            max_requests.unwrap_or(preset.max_requests),
            self.window_ms.unwrap_or(preset.window_ms),
        )
        .map_err(|e| ValidationError::InvalidRateLimitPolicy(name, e.to_string()))
    }

    /// Validate rate limiting configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        self.policies()?;
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            backend: RateLimitBackend::default(),
            sweep_interval_secs: default_sweep_interval(),
            login_max_requests: None,
            register_max_requests: None,
            two_factor_max_requests: None,
            api_max_requests: None,
            window_ms: None,
        }
    }
}

fn default_sweep_interval() -> u64 {
    600
}
