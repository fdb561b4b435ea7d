//! Exact-match column filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Active exact-match constraints, keyed by field.
///
/// A field absent from the state is unconstrained. Every present entry must
/// match for a record to survive (AND semantics).
///
/// ```
/// use roster_engine::FilterState;
///
/// let filters = FilterState::new()
///     .with("district", "Warangal")
///     .with("status", "active");
///
/// assert_eq!(filters.get("district"), Some("Warangal"));
/// assert_eq!(filters.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, String>);

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Adds a constraint, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets the required value for a field, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Removes the constraint on a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Returns the required value for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterates over `(field, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of active constraints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every constraint.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FilterState(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
