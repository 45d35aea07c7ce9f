//! Cache statistics tracking

/// Counters for cache activity.
///
/// The store is single-threaded, so these are plain integers updated
/// through `&mut` access rather than atomics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    removals: u64,
    evictions: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Lookups that found their key
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that did not find their key
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// `set` calls that created a new entry
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// `set` calls that overwrote an existing entry
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Entries removed explicitly by key
    pub fn removals(&self) -> u64 {
        self.removals
    }

    /// Entries dropped from the LRU end, by overflow or trimming
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
