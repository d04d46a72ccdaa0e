//! Process-lifetime in-memory cache
//!
//! A typed key/value store shared between request tasks. Entries never
//! expire and are never evicted; they live until the process exits or are
//! removed explicitly. Locking is coarse-grained: any number of readers may
//! hold the store at once, while a writer excludes every reader and writer.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;

/// Thread-safe key/value store holding values of a single type
#[derive(Debug)]
pub struct Cache<V> {
    name: &'static str,
    entries: Arc<RwLock<HashMap<String, V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync,
{
    /// Create an empty cache. `name` only labels log lines.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return a copy of the value stored under `key`
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        let value = entries.get(key).cloned();
        trace!(cache = self.name, key, hit = value.is_some(), "cache read");
        value
    }

    /// Store `value` under `key`, replacing any previous entry wholesale
    pub async fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        trace!(cache = self.name, key = %key, "cache write");
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
    }

    /// Whether an entry exists for `key`
    pub async fn exists(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Remove the entry for `key`, returning it if it was present.
    ///
    /// Check and removal happen under one write lock, so of several
    /// concurrent removals of the same key exactly one gets the value.
    pub async fn remove(&self, key: &str) -> Option<V> {
        let removed = self.entries.write().await.remove(key);
        trace!(cache = self.name, key, removed = removed.is_some(), "cache remove");
        removed
    }

    /// Copy of every entry currently in the store
    pub async fn snapshot(&self) -> HashMap<String, V> {
        self.entries.read().await.clone()
    }

    /// Number of entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Composite key for a translation of `name` in style `kind`
pub fn translation_key(name: &str, kind: &str) -> String {
    format!("{name}{kind}")
}
