//! Configuration Module
//!
//! Handles loading cache engine configuration from environment variables.

use std::env;

/// Cache engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries written without an explicit TTL
    pub default_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Default TTL in seconds (default: 600)
    /// - `SWEEP_INTERVAL_SECONDS` - Sweep frequency in seconds (default: 60)
    ///
    /// A value of `0` is treated as unset and falls back to the default,
    /// so a misconfigured environment cannot brick the default write path.
    pub fn from_env() -> Self {
        Self {
            default_ttl: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(600),
            sweep_interval: env::var("SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 600,
            sweep_interval: 60,
        }
    }
}
