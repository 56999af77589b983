//! Location cache with LRU eviction
//!
//! Maps (document, page, snippet) to a resolved `TextLocation` so re-renders
//! do not rescan page text.
//!
//! # Thread Safety
//!
//! The LRU list lives behind a `parking_lot::Mutex`. Every operation,
//! including a read hit, reorders the list, so reads take the lock
//! exclusively. Two passes writing the same key serialize on the lock and the
//! later write ends up most recent.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::document::TextLocation;
use crate::locate::normalize_snippet;

/// Default number of cached locations
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Cache configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Maximum number of locations to keep
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Cache key for a resolved location
///
/// A struct key rather than a joined string, so ids or snippets containing
/// separators cannot collide.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct LocationKey {
    pub document_id: String,
    /// Page number (1-indexed)
    pub page: usize,
    /// Trimmed, lowercased snippet
    pub text: String,
}

impl LocationKey {
    pub fn new(document_id: &str, page: usize, text: &str) -> Self {
        Self {
            document_id: document_id.to_string(),
            page,
            text: normalize_snippet(text),
        }
    }
}

struct CacheInner {
    entries: LruCache<LocationKey, TextLocation>,
    hits: u64,
    misses: u64,
}

/// Bounded location cache
///
/// Owned by a session and shared with resolvers through an `Arc`; there is
/// no process-wide instance.
pub struct LocationCache {
    inner: Mutex<CacheInner>,
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl LocationCache {
    /// Create a cache with the given configuration
    ///
    /// A zero capacity falls back to the default.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            inner: Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig { capacity })
    }

    /// Look up a location, marking it most recently used on a hit
    ///
    /// A miss leaves entries and recency untouched; bumping the `misses`
    /// counter in `stats` is its only effect.
    pub fn get(&self, document_id: &str, page: usize, text: &str) -> Option<TextLocation> {
        let key = LocationKey::new(document_id, page, text);
        let mut inner = self.inner.lock();
        match inner.entries.get(&key).cloned() {
            Some(location) => {
                inner.hits += 1;
                Some(location)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert or overwrite a location
    ///
    /// A new key at capacity evicts exactly the least recently used entry.
    /// Overwriting an existing key never evicts.
    pub fn set(&self, document_id: &str, page: usize, text: &str, location: TextLocation) {
        let key = LocationKey::new(document_id, page, text);
        let mut inner = self.inner.lock();
        if inner.entries.contains(&key) {
            inner.entries.put(key, location);
            return;
        }
        if let Some((evicted, _)) = inner.entries.push(key, location) {
            tracing::debug!(
                document_id = %evicted.document_id,
                page = evicted.page,
                "Evicted least recently used location"
            );
        }
    }

    /// Check for a key without touching recency
    pub fn contains(&self, document_id: &str, page: usize, text: &str) -> bool {
        let key = LocationKey::new(document_id, page, text);
        self.inner.lock().entries.contains(&key)
    }

    /// Remove every entry belonging to `document_id`
    ///
    /// Returns the number of entries removed. Entries of other documents keep
    /// their relative recency.
    pub fn clear_for_document(&self, document_id: &str) -> usize {
        let mut inner = self.inner.lock();
        // LruCache has no retain, so collect and pop
        let keys_to_remove: Vec<LocationKey> = inner
            .entries
            .iter()
            .filter(|(k, _)| k.document_id == document_id)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &keys_to_remove {
            inner.entries.pop(key);
        }

        tracing::debug!(
            document_id = %document_id,
            count = keys_to_remove.len(),
            "Cleared cached locations for document"
        );
        keys_to_remove.len()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Number of cached locations
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            len: inner.entries.len(),
            capacity: inner.entries.cap().get(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of cached locations
    pub len: usize,
    /// Maximum number of cached locations
    pub capacity: usize,
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
}
