//! In-memory property set.
//!
//! Values held here are always plaintext. Encryption happens only when a
//! store crosses the file boundary in [`loader`](super::loader) and
//! [`persister`](super::persister).
//!
//! A `PropertyStore` is not internally synchronized. It can be moved
//! between threads, but concurrent mutation of one instance needs
//! external locking.

use std::fmt;

use indexmap::IndexMap;
use zeroize::Zeroize;

/// Ordered key/value set with unique keys.
///
/// Iteration follows insertion order; overwriting a key keeps its original
/// position. Keys and values are wiped from memory when the store is
/// dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    entries: IndexMap<String, String>,
}

impl PropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a property.
    ///
    /// Returns the previous value when `key` was already present and `None`
    /// when the key is new.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a property, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order. Repeated calls yield the same order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut store = PropertyStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<(String, String)> for PropertyStore {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

// Values are secrets; only the keys are shown.
impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyStore")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for PropertyStore {
    fn drop(&mut self) {
        for (mut key, mut value) in self.entries.drain(..) {
            key.zeroize();
            value.zeroize();
        }
    }
}
