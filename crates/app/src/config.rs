//! Service configuration.

use std::time::Duration;

/// Cart store settings.
#[derive(Debug, Clone)]
pub struct CartStoreConfig {
    /// How long an untouched cart survives in the cache. Every mutation
    /// resets the clock.
    pub ttl: Duration,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}
