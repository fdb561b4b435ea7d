//! Cache keys for listing requests.

use std::collections::BTreeMap;
use std::fmt;

/// Request string used as a cache key: a URL plus query parameters.
///
/// Parameters are kept sorted, so two requests that differ only in
/// parameter order share a key. The URL comes first, which keeps
/// [`invalidate`](crate::ResponseCache::invalidate) by URL prefix working.
///
/// ```
/// use roster_cache::CacheKey;
///
/// let a = CacheKey::new("/api/players").param("page", 2).param("district", "Warangal");
/// let b = CacheKey::new("/api/players").param("district", "Warangal").param("page", 2);
///
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "/api/players?district=Warangal&page=2");
/// assert_eq!(CacheKey::new("/api/news").to_string(), "/api/news");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    url: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    /// Creates a key for `url` with no parameters.
    pub fn new(url: impl Into<String>) -> Self {
        CacheKey {
            url: url.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds a parameter, builder style. A repeated name keeps the last value.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// The URL part of the key.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The parameters, sorted by name.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            f.write_str(if i == 0 { "?" } else { "&" })?;
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}

impl From<&CacheKey> for String {
    fn from(key: &CacheKey) -> Self {
        key.to_string()
    }
}
