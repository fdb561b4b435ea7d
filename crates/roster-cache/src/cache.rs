//! Response cache with per-entry TTL, LRU eviction and prefix invalidation.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::config::ResponseCacheConfig;
use crate::stats::CacheStats;

struct Entry<V> {
    value: V,
    /// `None` when the TTL is too large to represent.
    expires_at: Option<Instant>,
    /// Recency stamp; the lowest stamp is the least recently used.
    used: u64,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Cache of listing responses keyed by request string.
///
/// Every entry carries its own TTL. Expired entries are never returned: a
/// lookup that finds one removes it and reports a miss. When the cache is
/// full, expired entries are dropped first, then the least recently used
/// one.
///
/// # Example
///
/// ```
/// use roster_cache::{CacheKey, ResponseCache, ResponseCacheConfig};
///
/// let mut cache: ResponseCache<Vec<String>> = ResponseCache::new(ResponseCacheConfig::default());
///
/// let key = CacheKey::new("/api/players").param("page", 1);
/// cache.insert(&key, vec!["Player A".to_string()]);
/// cache.insert("/api/news?page=1", vec![]);
///
/// assert_eq!(cache.get(&String::from(&key)).map(Vec::len), Some(1));
///
/// // A player was edited: drop every cached players response.
/// assert_eq!(cache.invalidate(Some("/api/players")), 1);
/// assert!(cache.get("/api/players?page=1").is_none());
/// assert_eq!(cache.len(), 1);
/// ```
pub struct ResponseCache<V, C = SystemClock> {
    config: ResponseCacheConfig,
    clock: C,
    /// Ordered by key, so a prefix is a contiguous range.
    entries: BTreeMap<String, Entry<V>>,
    /// Recency stamp to key.
    recency: BTreeMap<u64, String>,
    next_stamp: u64,
    stats: CacheStats,
}

impl<V> ResponseCache<V> {
    /// Creates a cache reading the system clock.
    pub fn new(config: ResponseCacheConfig) -> Self {
        ResponseCache::with_clock(config, SystemClock)
    }
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        ResponseCache::new(ResponseCacheConfig::default())
    }
}

impl<V, C: Clock> ResponseCache<V, C> {
    /// Creates a cache reading the given clock.
    pub fn with_clock(mut config: ResponseCacheConfig, clock: C) -> Self {
        config.capacity = config.capacity.max(1);
        ResponseCache {
            config,
            clock,
            entries: BTreeMap::new(),
            recency: BTreeMap::new(),
            next_stamp: 0,
            stats: CacheStats::new(),
        }
    }

    /// Returns the cached response for `key`, marking it recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                log::trace!("cache miss: {}", key);
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            log::trace!("cache entry expired: {}", key);
            return None;
        }

        let stamp = self.stamp();
        let entry = self.entries.get_mut(key)?;
        self.recency.remove(&entry.used);
        self.recency.insert(stamp, key.to_string());
        entry.used = stamp;
        self.stats.record_hit();
        log::trace!("cache hit: {}", key);
        Some(&entry.value)
    }

    /// Returns the cached response without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| &entry.value)
    }

    /// Returns `true` if a live entry exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    /// Caches a response for the configured default TTL.
    ///
    /// Returns the response previously cached under `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let ttl = self.config.default_ttl;
        self.insert_with_ttl(key, value, ttl)
    }

    /// Caches a response for `ttl`.
    ///
    /// Returns the response previously cached under `key`, if any.
    pub fn insert_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Duration) -> Option<V> {
        let key = key.into();
        let now = self.clock.now();

        let previous = self.remove_entry(&key);
        if previous.is_none() && self.entries.len() >= self.config.capacity {
            self.make_room(now);
        }

        let stamp = self.stamp();
        self.recency.insert(stamp, key.clone());
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: now.checked_add(ttl),
                used: stamp,
            },
        );
        self.stats.record_insert();
        previous
    }

    /// Removes the entry for `key`, returning its response.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.remove_entry(key)
    }

    /// Removes every key starting with `prefix`, or everything with `None`.
    ///
    /// Returns the number of entries removed, expired ones included.
    pub fn invalidate(&mut self, prefix: Option<&str>) -> usize {
        let removed = match prefix {
            None => {
                let count = self.entries.len();
                self.entries.clear();
                self.recency.clear();
                count
            }
            Some(prefix) => {
                let keys: Vec<String> = self
                    .entries
                    .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
                    .map(|(key, _)| key)
                    .take_while(|key| key.starts_with(prefix))
                    .cloned()
                    .collect();
                for key in &keys {
                    self.remove_entry(key);
                }
                keys.len()
            }
        };

        self.stats.record_invalidations(removed);
        log::debug!(
            "invalidated {} cache entries (prefix: {})",
            removed,
            prefix.unwrap_or("*")
        );
        removed
    }

    /// Removes every expired entry, returning how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let removed = self.purge_expired_at(now);
        self.stats.record_expirations(removed);
        removed
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResponseCacheConfig {
        &self.config
    }

    /// Activity counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    fn remove_entry(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(&entry.used);
        Some(entry.value)
    }

    fn make_room(&mut self, now: Instant) {
        let expired = self.purge_expired_at(now);
        if expired > 0 {
            self.stats.record_expirations(expired);
            return;
        }

        let oldest = self.recency.first_key_value().map(|(_, key)| key.clone());
        if let Some(key) = oldest {
            self.remove_entry(&key);
            self.stats.record_eviction();
            log::trace!("cache evicted least recently used: {}", key);
        }
    }

    fn purge_expired_at(&mut self, now: Instant) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.remove_entry(key);
        }
        expired.len()
    }
}

impl<V, C> fmt::Debug for ResponseCache<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("config", &self.config)
            .field("len", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// A [`ResponseCache`] behind a mutex, shareable across threads.
///
/// Clones share the same cache. Lookups return clones of the cached
/// response, so wrap large responses in `Arc`.
///
/// ```
/// use std::sync::Arc;
/// use roster_cache::{ResponseCacheConfig, SharedResponseCache};
///
/// let cache: SharedResponseCache<Arc<Vec<u32>>> =
///     SharedResponseCache::new(ResponseCacheConfig::default());
/// let worker = cache.clone();
///
/// std::thread::spawn(move || {
///     worker.insert("/api/districts", Arc::new(vec![1, 2, 3]));
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(cache.get("/api/districts").map(|v| v.len()), Some(3));
/// ```
pub struct SharedResponseCache<V, C = SystemClock> {
    inner: Arc<Mutex<ResponseCache<V, C>>>,
}

impl<V> SharedResponseCache<V> {
    /// Creates a shared cache reading the system clock.
    pub fn new(config: ResponseCacheConfig) -> Self {
        SharedResponseCache::with_clock(config, SystemClock)
    }
}

impl<V, C: Clock> SharedResponseCache<V, C> {
    /// Creates a shared cache reading the given clock.
    pub fn with_clock(config: ResponseCacheConfig, clock: C) -> Self {
        SharedResponseCache {
            inner: Arc::new(Mutex::new(ResponseCache::with_clock(config, clock))),
        }
    }

    /// Returns a clone of the cached response for `key`.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns the cached response, computing and caching it on a miss.
    ///
    /// The lock is released while `load` runs, so concurrent misses on the
    /// same key may each call `load`; the last insert wins.
    pub fn get_or_try_insert_with<E, F>(&self, key: &str, load: F) -> Result<V, E>
    where
        V: Clone,
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = load()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// See [`ResponseCache::insert`].
    pub fn insert(&self, key: impl Into<String>, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// See [`ResponseCache::insert_with_ttl`].
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) -> Option<V> {
        self.inner.lock().insert_with_ttl(key, value, ttl)
    }

    /// See [`ResponseCache::remove`].
    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// See [`ResponseCache::invalidate`].
    pub fn invalidate(&self, prefix: Option<&str>) -> usize {
        self.inner.lock().invalidate(prefix)
    }

    /// See [`ResponseCache::purge_expired`].
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// A snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats().clone()
    }
}

impl<V, C> Clone for SharedResponseCache<V, C> {
    fn clone(&self) -> Self {
        SharedResponseCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, C> fmt::Debug for SharedResponseCache<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResponseCache").finish_non_exhaustive()
    }
}
