//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' must be at least {min}, got {actual}")]
    BelowMinimum {
        field: String,
        min: u64,
        actual: u64,
    },
}

impl ValidationError {
    /// Creates a below-minimum validation error.
    pub fn below_minimum(field: impl Into<String>, min: u64, actual: u64) -> Self {
        ValidationError::BelowMinimum {
            field: field.into(),
            min,
            actual,
        }
    }
}

/// Machine-readable codes carried in JSON error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Not found errors
    EndpointNotFound,

    // Throttling
    RateLimited,

    // Infrastructure errors
    CacheError,
}

impl ErrorCode {
    /// Wire representation used in JSON error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EndpointNotFound => "ENDPOINT_NOT_FOUND",
            ErrorCode::RateLimited => "RATE_LIMIT_EXCEEDED",
            ErrorCode::CacheError => "CACHE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
