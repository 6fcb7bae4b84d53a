//! Cache service trait.

use async_trait::async_trait;

/// Occupancy snapshot reported by a cache backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
}

/// Lookaside cache of `name -> url` mappings.
///
/// The cache is an accelerator over the link store, never a source of truth.
/// Implementations cannot fail: a broken cache degrades to misses, and every
/// mutation is best effort.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process LRU cache
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached URL for `name`, promoting it on a hit.
    async fn get_url(&self, name: &str) -> Option<String>;

    /// Inserts or replaces the mapping for `name`.
    async fn set_url(&self, name: &str, url: &str);

    /// Overwrites the mapping for `name` only if it is already resident.
    ///
    /// Returns `true` when an entry was refreshed.
    async fn refresh_url(&self, name: &str, url: &str) -> bool;

    /// Removes the mapping for `name`. Absent names are ignored.
    async fn invalidate(&self, name: &str);

    /// Current occupancy.
    fn stats(&self) -> CacheStats;
}
