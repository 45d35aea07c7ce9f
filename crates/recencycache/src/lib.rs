//! # recencycache
//!
//! Fixed-capacity, in-memory key-value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1))
//! - **LRU List**: Sentinel-bounded doubly-linked list over the same slots (O(1))
//! - **Statistics**: Hit/miss/eviction counters
//!
//! The index and the list are only ever changed together, inside a single
//! `&mut self` call, so callers never see them disagree.
//!
//! ```
//! use recencycache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get("a");
//! cache.set("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get("b"), None);
//! assert_eq!(cache.len(), 2);
//! # Ok::<(), recencycache::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod lru;
mod stats;

pub use error::{Error, Result};
pub use lru::{Iter, LruCache};
pub use stats::CacheStats;
