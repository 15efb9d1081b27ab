//! Construction and initialization logic for RbMap.
//!
//! This module contains map construction, pool pre-sizing and the standard
//! trait implementations that build or duplicate a map.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::pool::NodePool;
use crate::types::{RbMap, LEAF};

/// Number of node pairs reserved by [`RbMap::new`]. Zero keeps `new` allocation-free.
pub const DEFAULT_CAPACITY: usize = 0;

/// Source of process-unique map ids, so a cursor can never be honored by a
/// map other than the one that issued it.
static NEXT_MAP_ID: AtomicU32 = AtomicU32::new(1);

fn next_map_id() -> u32 {
    NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)
}

impl<K, V> RbMap<K, V> {
    /// Create an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let map: RbMap<i32, String> = RbMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.begin(), map.end());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty map whose pool can hold `capacity` entries before
    /// reallocating.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of node pairs to reserve up front
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::with_capacity(64);
    /// map.store(1, "one");
    /// assert_eq!(map.pool_stats().total_pairs, 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: next_map_id(),
            root: LEAF,
            len: 0,
            pool: NodePool::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for RbMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for RbMap<K, V> {
    /// The clone gets its own id: cursors issued by `self` are `Invalid` on it.
    fn clone(&self) -> Self {
        Self {
            id: next_map_id(),
            root: self.root,
            len: self.len,
            pool: self.pool.clone(),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RbMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.store(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_empty() {
        let map: RbMap<i32, i32> = RbMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.begin(), map.end());
        assert!(map.check_invariants());
    }

    #[test]
    fn test_maps_get_distinct_ids() {
        let a: RbMap<i32, i32> = RbMap::new();
        let b: RbMap<i32, i32> = RbMap::default();
        assert_ne!(a.id, b.id);
        assert_ne!(a.end(), b.end());
    }

    #[test]
    fn test_from_iter_and_debug() {
        let map: RbMap<i32, &str> = vec![(2, "b"), (1, "a"), (3, "c"), (2, "B")]
            .into_iter()
            .collect();
        assert_eq!(map.len(), 3);
        assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "B", 3: "c"}"#);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original: RbMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
        let cursor = original.find(&5);

        let mut copy = original.clone();
        assert!(copy.key(cursor).unwrap_err().is_invalid());

        copy.store(5, 500);
        original.delete(&0);
        assert_eq!(original.load(&5), Some(&5));
        assert_eq!(copy.load(&5), Some(&500));
        assert_eq!(copy.len(), 10);
        assert_eq!(original.len(), 9);
        assert!(copy.check_invariants());
    }
}
