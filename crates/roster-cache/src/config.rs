//! Cache configuration

use std::time::Duration;

/// Configuration for a [`ResponseCache`](crate::ResponseCache).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use roster_cache::ResponseCacheConfig;
///
/// let config = ResponseCacheConfig::default()
///     .with_capacity(100)
///     .with_default_ttl(Duration::from_secs(300));
/// assert_eq!(config.capacity, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCacheConfig {
    /// Maximum number of cached responses. At least 1.
    ///
    /// Default: 500
    pub capacity: usize,

    /// TTL used by [`insert`](crate::ResponseCache::insert).
    ///
    /// Default: 1 minute
    pub default_ttl: Duration,
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            default_ttl: Duration::from_secs(60),
        }
    }
}

impl ResponseCacheConfig {
    /// Creates a config with the given capacity and default TTL.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            capacity,
            default_ttl,
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the default TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}
