//! Resolution cache for card lookups.
//!
//! Results are keyed by the exact input name and kept for the lifetime of
//! the cache, including negative (not-found) results so a failing name is
//! never looked up twice. The cache is an owned object injected into the
//! resolver; tests construct a fresh one each.
//!
//! # Capacity
//!
//! By default the cache is unbounded. A bounded capacity switches it to
//! LRU eviction, which trades the "resolve once per process" guarantee for
//! a memory ceiling.
//!
//! # Thread Safety
//!
//! All mutable state is protected by `tokio::sync::RwLock`.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::card::Card;

// ============================================================================
// Resolution
// ============================================================================

/// Outcome of resolving one card name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The card was found.
    Found(Card),
    /// No card matches the name.
    NotFound,
}

impl Resolution {
    /// The card, if found.
    pub fn card(&self) -> Option<&Card> {
        match self {
            Resolution::Found(card) => Some(card),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn into_card(self) -> Option<Card> {
        match self {
            Resolution::Found(card) => Some(card),
            Resolution::NotFound => None,
        }
    }
}

impl From<Option<Card>> for Resolution {
    fn from(card: Option<Card>) -> Self {
        match card {
            Some(card) => Resolution::Found(card),
            None => Resolution::NotFound,
        }
    }
}

// ============================================================================
// CacheStats
// ============================================================================

/// Statistics about cache performance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,

    /// Number of lookups that missed.
    pub misses: u64,

    /// Number of entries evicted due to capacity limits.
    pub evictions: u64,

    /// Number of cached not-found entries.
    pub negative_entries: usize,

    /// Current number of entries in the cache.
    pub current_size: usize,

    /// Maximum capacity, `None` when unbounded.
    pub capacity: Option<usize>,
}

impl CacheStats {
    /// Hit rate in `[0, 1]`; 0.0 if no lookups have been performed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// ============================================================================
// ResolutionCache
// ============================================================================

/// Card-name keyed cache of [`Resolution`]s.
pub struct ResolutionCache {
    entries: RwLock<LruCache<String, Resolution>>,
    stats: RwLock<CacheStats>,
}

impl ResolutionCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::build(LruCache::unbounded(), None)
    }

    /// Create a cache with LRU eviction at `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self::build(LruCache::new(capacity), Some(capacity.get()))
    }

    /// Create a cache from an optional capacity (`None` = unbounded).
    pub fn from_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Self::with_capacity(capacity),
            None => Self::new(),
        }
    }

    fn build(entries: LruCache<String, Resolution>, capacity: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(entries),
            stats: RwLock::new(CacheStats {
                capacity,
                ..Default::default()
            }),
        }
    }

    /// Look up a name, recording a hit or miss.
    pub async fn get(&self, name: &str) -> Option<Resolution> {
        let mut entries = self.entries.write().await;
        let found = entries.get(name).cloned();

        let mut stats = self.stats.write().await;
        if found.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        found
    }

    /// Store a resolution for a name.
    pub async fn put(&self, name: impl Into<String>, resolution: Resolution) {
        let name = name.into();
        let mut entries = self.entries.write().await;
        let evicted = entries.push(name.clone(), resolution);

        let mut stats = self.stats.write().await;
        if let Some((evicted_key, _)) = evicted {
            // push returns the old value for the same key on update
            if evicted_key != name {
                stats.evictions += 1;
            }
        }
        stats.current_size = entries.len();
        stats.negative_entries = entries
            .iter()
            .filter(|(_, r)| matches!(r, Resolution::NotFound))
            .count();
    }

    /// Check for an entry without touching statistics or recency.
    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains(name)
    }

    /// Current number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    /// Remove every entry. Hit/miss counters are cumulative and kept.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();

        let mut stats = self.stats.write().await;
        stats.current_size = 0;
        stats.negative_entries = 0;
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}
