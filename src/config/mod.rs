//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FINANWAS_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use finanwas::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod features;
mod rate_limit;
mod redis;
mod server;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use rate_limit::{RateLimitBackend, RateLimitConfig};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limiter backend, sweep interval and policy overrides
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Redis configuration (shared rate limit counters)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FINANWAS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FINANWAS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FINANWAS__RATE_LIMIT__BACKEND=redis` -> `rate_limit.backend = redis`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FINANWAS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Redis settings are only checked when the Redis backend is selected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.rate_limit.validate()?;
        if self.rate_limit.backend == RateLimitBackend::Redis {
            self.redis.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// True when counters are kept per process in a production deployment,
    /// where several replicas would each enforce their own allowance.
    pub fn has_single_instance_limits(&self) -> bool {
        self.is_production()
            && self.features.enable_rate_limiting
            && self.rate_limit.backend == RateLimitBackend::Memory
    }
}
