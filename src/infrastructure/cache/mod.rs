//! Lookaside caching for fast redirects.
//!
//! - [`LruCache`] - generic fixed-capacity LRU container
//! - [`CacheService`] - async seam consumed by the link service
//! - [`MemoryCache`] - mutex-guarded `LruCache` implementing `CacheService`

pub mod lru;
mod memory_cache;
mod service;

pub use lru::LruCache;
pub use memory_cache::MemoryCache;
pub use service::{CacheService, CacheStats};
