//! Response DTOs for quota inspection.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitInfo, RateLimitPolicy};

/// The caller's quota on one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaResponse {
    pub endpoint: String,
    pub limit: u32,
    pub window_ms: u64,
    /// Requests already counted in the active window.
    pub used: u32,
    pub remaining: u32,
    /// `None` when no window is active.
    pub reset_ms: Option<u64>,
    pub reset_at: Option<Timestamp>,
}

impl QuotaResponse {
    pub fn new(endpoint: &str, policy: RateLimitPolicy, info: Option<RateLimitInfo>) -> Self {
        match info {
            Some(info) => Self {
                endpoint: endpoint.to_string(),
                limit: info.limit,
                window_ms: policy.window_ms,
                used: info.count,
                remaining: info.remaining,
                reset_ms: Some(info.reset_ms),
                reset_at: Some(info.reset_at),
            },
            None => Self {
                endpoint: endpoint.to_string(),
                limit: policy.max_requests,
                window_ms: policy.window_ms,
                used: 0,
                remaining: policy.max_requests,
                reset_ms: None,
                reset_at: None,
            },
        }
    }
}
