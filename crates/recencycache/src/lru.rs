//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in a slot arena and are chained into a doubly-linked list
//! by slot index. Slots 0 and 1 hold the head and tail sentinels, so
//! linking and unlinking never branch on an empty list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::stats::CacheStats;

/// Slot of the head sentinel (most recently used side)
const HEAD: usize = 0;

/// Slot of the tail sentinel (least recently used side)
const TAIL: usize = 1;

/// Upper bound on slots reserved up front
const MAX_PREALLOC: usize = 4096;

/// Node in the LRU doubly-linked list. Sentinels and free slots carry no entry.
struct Node<K, V> {
    entry: Option<(K, V)>,
    prev: usize,
    next: usize,
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V, S = RandomState> {
    map: HashMap<K, usize, S>,
    nodes: Vec<Node<K, V>>,
    free_list: Vec<usize>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, RandomState::new())
    }

    /// Create a new LRU cache from a signed capacity
    ///
    /// Zero and negative values are rejected with `Error::InvalidCapacity`.
    pub fn from_signed(capacity: i64) -> Result<Self> {
        if capacity <= 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        Self::new(usize::try_from(capacity).unwrap_or(usize::MAX))
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Create a new LRU cache that hashes keys with `hasher`
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(0));
        }

        let reserve = capacity.min(MAX_PREALLOC);
        let mut nodes = Vec::with_capacity(reserve + 2);
        nodes.push(Node { entry: None, prev: HEAD, next: TAIL });
        nodes.push(Node { entry: None, prev: HEAD, next: TAIL });

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(reserve, hasher),
            nodes,
            free_list: Vec::new(),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Insert or overwrite a key-value pair, marking it most recently used.
    ///
    /// Inserting a new key into a full cache evicts the least recently
    /// used entry.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(idx) = self.map.get(&key).copied() {
            if let Some((_, slot)) = self.nodes[idx].entry.as_mut() {
                *slot = value;
            }
            self.move_to_front(idx);
            self.stats.record_update();
            return;
        }

        while self.map.len() >= self.capacity {
            if !self.evict() {
                break;
            }
        }

        let idx = self.alloc_node(key.clone(), value);
        self.map.insert(key, idx);
        self.link_front(idx);
        self.stats.record_insert();
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(idx) = self.map.get(key).copied() else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.move_to_front(idx);
        self.nodes[idx].entry.as_ref().map(|(_, value)| value)
    }

    /// Get a value without touching recency or statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].entry.as_ref().map(|(_, value)| value)
    }

    /// Check whether a key is cached without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Remove a key from the cache, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        let (_, value) = self.release(idx)?;
        self.stats.record_removal();
        Some(value)
    }

    /// Drop every entry. Safe to call on an empty cache.
    pub fn remove_all(&mut self) {
        let removed = self.map.len();

        self.map.clear();
        self.nodes.truncate(2);
        self.free_list.clear();
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;

        debug!(removed, "cleared cache");
    }

    /// Evict least recently used entries until at most `target` remain.
    ///
    /// A negative `target` leaves the cache unchanged.
    pub fn trim_to(&mut self, target: isize) {
        let Ok(target) = usize::try_from(target) else {
            return;
        };

        let mut removed = 0usize;
        while self.map.len() > target {
            if !self.evict() {
                break;
            }
            removed += 1;
        }

        if removed > 0 {
            debug!(removed, remaining = self.map.len(), "trimmed cache");
        }
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.nodes[HEAD].next == idx {
            return; // Already at front
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let Node { prev, next, .. } = self.nodes[idx];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Drop the entry just before the tail sentinel. Returns false when empty.
    fn evict(&mut self) -> bool {
        let idx = self.nodes[TAIL].prev;
        if idx == HEAD {
            return false;
        }

        self.unlink(idx);
        if let Some((key, _)) = self.release(idx) {
            self.map.remove(&key);
        }
        self.stats.record_eviction();
        trace!(slot = idx, "evicted least recently used entry");
        true
    }

    fn alloc_node(&mut self, key: K, value: V) -> usize {
        let node = Node {
            entry: Some((key, value)),
            prev: HEAD,
            next: TAIL,
        };

        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    fn release(&mut self, idx: usize) -> Option<(K, V)> {
        let entry = self.nodes[idx].entry.take();
        self.free_list.push(idx);
        entry
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries held at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Activity counters since construction or the last reset
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the activity counters
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.nodes[HEAD].next,
            remaining: self.map.len(),
        }
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over cache entries in recency order
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }

        let node = &self.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.entry.as_ref().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
