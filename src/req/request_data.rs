//! Per-request middleware handoff storage.
//!
//! Middleware uses [`RequestData`] to stash string-keyed values for downstream
//! middleware and the handler to read back, without widening the `HttpRequest`
//! struct itself. This is the string-keyed counterpart of the request's typed
//! container view (see [`crate::scope`]).

use ahash::AHashMap;

/// A string-keyed bag attached to every request for middleware handoff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    values: AHashMap<String, String>,
}

impl RequestData {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, overwriting any previous value under the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Alias for [`Self::set`].
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, value);
    }

    /// Reads a value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Reads a value by key, borrowing rather than cloning.
    pub fn get_ref(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// True if `key` has been set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes and returns a value by key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Iterates over all key/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Implemented by `#[derive(FromData)]` to bind a struct's fields from [`RequestData`].
pub trait FromData: Sized {
    /// Parse `Self` out of the request's data store, or describe what's missing/invalid.
    fn from_data(data: &RequestData) -> Result<Self, String>;
}
