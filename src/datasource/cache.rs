//! Coalescing lookup cache
//!
//! Callers asking for the same key while a fetch is in flight wait on that
//! fetch instead of starting their own. Resolved values are served from memory
//! until invalidated. A failed fetch leaves the entry empty so the next caller
//! retries.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

pub struct LookupCache<K, V> {
    entries: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> LookupCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, running `fetch` at most once at a time
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(key).or_default())
        };

        if let Some(value) = cell.get() {
            tracing::trace!("lookup cache hit");
            return Ok(value.clone());
        }

        let value = cell.get_or_try_init(fetch).await?;
        Ok(value.clone())
    }

    /// Drop the entry for `key`
    pub async fn invalidate(&self, key: &K) {
        self.entries.lock().await.remove(key);
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

impl<K, V> Default for LookupCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
