use std::{collections::HashMap, hash::Hash};
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Generic in-memory key-value map guarded by a single lock.
///
/// Every write goes through one critical section, so a check-then-mutate
/// sequence run inside [`MemoryMapStore::update_map`] is atomic with respect
/// to other callers.
pub struct MemoryMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for MemoryMapStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given entries already present.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self { inner: RwLock::new(entries.into_iter().collect()) }
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or overwrite a value by key.
    pub async fn insert(&self, key: K, value: V) {
        let mut map = self.inner.write().await;
        map.insert(key, value);
    }

    /// Remove a key; returns whether it existed.
    pub async fn remove(&self, key: &K) -> bool {
        let mut map = self.inner.write().await;
        map.remove(key).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Apply a mutation to the underlying map while holding the write lock.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<T, ServiceError>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}
