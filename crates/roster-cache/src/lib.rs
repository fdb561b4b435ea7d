//! Roster cache - a response cache for listing requests.
//!
//! Directory screens fetch the same listings over and over while a user
//! pages and filters. [`ResponseCache`] keeps those responses keyed by
//! request string, each with its own time-to-live, bounded by a capacity
//! with least-recently-used eviction. Writes invalidate by URL prefix.
//!
//! ```rust
//! use std::time::Duration;
//! use roster_cache::{CacheKey, ManualClock, ResponseCache, ResponseCacheConfig};
//!
//! let clock = ManualClock::new();
//! let config = ResponseCacheConfig::default().with_default_ttl(Duration::from_secs(60));
//! let mut cache = ResponseCache::with_clock(config, clock.clone());
//!
//! let key = CacheKey::new("/api/tournaments").param("status", "upcoming");
//! cache.insert(&key, "3 tournaments");
//! assert_eq!(cache.get("/api/tournaments?status=upcoming"), Some(&"3 tournaments"));
//!
//! clock.advance(Duration::from_secs(61));
//! assert_eq!(cache.get("/api/tournaments?status=upcoming"), None);
//! ```

mod cache;
mod clock;
mod config;
mod key;
mod stats;

// Re-export public API
pub use cache::{ResponseCache, SharedResponseCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ResponseCacheConfig;
pub use key::CacheKey;
pub use stats::CacheStats;
