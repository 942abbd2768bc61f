//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Guard API routes with the rate limiter
    #[serde(default = "default_enable_rate_limiting")]
    pub enable_rate_limiting: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_rate_limiting: default_enable_rate_limiting(),
            json_logs: false,
        }
    }
}

fn default_enable_rate_limiting() -> bool {
    true
}
