//! Per-endpoint rate limit policies.
//!
//! Maps logical endpoint names to the allowance enforced for them.

use serde::{Deserialize, Serialize};

use crate::ports::RateLimitPolicy;

/// Endpoint name for password login attempts.
pub const ENDPOINT_LOGIN: &str = "login";
/// Endpoint name for account registration.
pub const ENDPOINT_REGISTER: &str = "register";
/// Endpoint name for TOTP second-factor verification.
pub const ENDPOINT_TWO_FACTOR: &str = "two_factor";
/// Endpoint name for investor classification.
pub const ENDPOINT_INVESTOR_CLASSIFY: &str = "investor_classify";
/// Endpoint name for general API traffic.
pub const ENDPOINT_API: &str = "api";

/// Policy table for every rate-limited endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicies {
    /// Password login (brute-force protection).
    pub login: RateLimitPolicy,
    /// Account creation.
    pub register: RateLimitPolicy,
    /// Second-factor code verification.
    pub two_factor: RateLimitPolicy,
    /// Everything else under `/api`.
    pub api: RateLimitPolicy,
}

impl Default for RateLimitPolicies {
    fn default() -> Self {
        Self {
            login: RateLimitPolicy::login(),
            register: RateLimitPolicy::register(),
            two_factor: RateLimitPolicy::two_factor(),
            api: RateLimitPolicy::api(),
        }
    }
}

impl RateLimitPolicies {
    /// Get the policy for a named endpoint.
    ///
    /// Returns `None` for endpoints that are not rate limited.
    pub fn for_endpoint(&self, endpoint: &str) -> Option<RateLimitPolicy> {
        match endpoint {
            ENDPOINT_LOGIN => Some(self.login),
            ENDPOINT_REGISTER => Some(self.register),
            ENDPOINT_TWO_FACTOR => Some(self.two_factor),
            ENDPOINT_INVESTOR_CLASSIFY | ENDPOINT_API => Some(self.api),
            _ => None,
        }
    }
}
