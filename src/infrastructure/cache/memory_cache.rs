//! In-process LRU implementation of [`CacheService`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use metrics::{counter, gauge};
use tracing::debug;

use super::lru::LruCache;
use super::service::{CacheService, CacheStats};

/// Thread-safe `name -> url` cache backed by a fixed-capacity [`LruCache`].
///
/// A single mutex guards the whole container. Every operation is O(1) and the
/// lock is never held across an `.await`.
#[derive(Debug)]
pub struct MemoryCache {
    inner: Mutex<LruCache<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache holding at most `capacity` mappings.
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "Using in-memory LRU cache");
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Locks the container.
    ///
    /// A panic inside a critical section cannot leave the list half-linked in a
    /// way later operations depend on, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, name: &str) -> Option<String> {
        let cached = self.lock().read(name).cloned();

        if cached.is_some() {
            debug!(name, "Cache HIT");
            counter!("shortr_cache_hits_total").increment(1);
        } else {
            debug!(name, "Cache MISS");
            counter!("shortr_cache_misses_total").increment(1);
        }

        cached
    }

    async fn set_url(&self, name: &str, url: &str) {
        let (evicted, entries) = {
            let mut cache = self.lock();
            let evicted = cache.write(name.to_string(), url.to_string());
            (evicted, cache.len())
        };

        debug!(name, url, "Cache SET");
        if let Some((evicted_name, _)) = evicted {
            debug!(name = %evicted_name, "Cache EVICT");
            counter!("shortr_cache_evictions_total").increment(1);
        }
        gauge!("shortr_cache_entries").set(entries as f64);
    }

    async fn refresh_url(&self, name: &str, url: &str) -> bool {
        let refreshed = {
            let mut cache = self.lock();
            if cache.contains_key(name) {
                cache.write(name.to_string(), url.to_string());
                true
            } else {
                false
            }
        };

        if refreshed {
            debug!(name, url, "Cache REFRESH");
        }
        refreshed
    }

    async fn invalidate(&self, name: &str) {
        let (removed, entries) = {
            let mut cache = self.lock();
            let removed = cache.remove(name);
            (removed, cache.len())
        };

        if removed.is_some() {
            debug!(name, "Cache INVALIDATE");
        }
        gauge!("shortr_cache_entries").set(entries as f64);
    }

    fn stats(&self) -> CacheStats {
        let cache = self.lock();
        CacheStats {
            entries: cache.len(),
            capacity: cache.capacity(),
        }
    }
}
