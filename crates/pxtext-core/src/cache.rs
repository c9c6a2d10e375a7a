//! Per-strand cache of glyph masks
//!
//! Masks are keyed by the concrete glyph and the settings snapshot that was
//! active when they were requested. Changing a setting makes old entries
//! unreachable; they age out through LRU eviction instead of being purged.

use crate::cache_config;
use crate::mask::GlyphMask;
use crate::settings::SettingsVector;
use crate::types::GlyphId;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies a cached mask
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaskCacheKey {
    /// Always a concrete glyph, never a family
    pub glyph: GlyphId,
    pub settings: Arc<SettingsVector>,
}

/// LRU mask cache with hit and miss counters
pub struct MaskCache {
    cache: Mutex<LruCache<MaskCacheKey, Arc<GlyphMask>>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(cache_config::DEFAULT_CAPACITY) {
    Some(v) => v,
    None => unreachable!(),
};

impl MaskCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(FALLBACK_CAPACITY);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache sized from the environment, see [`cache_config::cache_capacity`]
    pub fn with_default_capacity() -> Self {
        Self::new(cache_config::cache_capacity())
    }

    pub fn get(&self, key: &MaskCacheKey) -> Option<Arc<GlyphMask>> {
        let found = self.cache.lock().get(key).cloned();
        match found {
            Some(mask) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(mask)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: MaskCacheKey, mask: Arc<GlyphMask>) {
        self.cache.lock().put(key, mask);
    }

    /// Cached mask for `key`, producing and storing it on a miss
    ///
    /// With caching globally disabled the producer runs every time.
    pub fn get_or_insert_with<F>(&self, key: MaskCacheKey, produce: F) -> Option<Arc<GlyphMask>>
    where
        F: FnOnce() -> Option<Arc<GlyphMask>>,
    {
        if !cache_config::is_caching_enabled() {
            return produce();
        }
        if let Some(mask) = self.get(&key) {
            return Some(mask);
        }
        let mask = produce()?;
        log::trace!("caching mask for glyph {}", key.glyph);
        self.insert(key, Arc::clone(&mask));
        Some(mask)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            capacity: self.capacity.get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for MaskCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl std::fmt::Debug for MaskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskCache")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Snapshot of cache performance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
