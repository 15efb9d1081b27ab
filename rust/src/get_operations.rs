//! GET operations for RbMap.
//!
//! This module contains the read-only operations: the tree descent shared by
//! every keyed operation, value lookup and size queries.

use std::cmp::Ordering;

use crate::pool::PoolStats;
use crate::types::{NodeId, RbMap, END_ENTRY, HELP_ENTRY, LEAF, NULL_NODE};

impl<K: Ord, V> RbMap<K, V> {
    /// Walk down from the root looking for `key`.
    ///
    /// Returns `(parent, found)`: `found` is the matching node or `LEAF` on a
    /// miss, `parent` is the last real node visited before `found`
    /// (`NULL_NODE` when the descent stopped at the root).
    pub(crate) fn search_node(&self, key: &K) -> (NodeId, NodeId) {
        let mut parent = NULL_NODE;
        let mut current = self.root;

        while let Some(current_key) = self.pool.key_at(current) {
            let node = self.pool.node(current);
            let next = match key.cmp(current_key) {
                Ordering::Equal => return (parent, current),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            parent = current;
            current = next;
        }

        (parent, LEAF)
    }

    /// Get a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.store(1, "one");
    /// assert_eq!(map.load(&1), Some(&"one"));
    /// assert_eq!(map.load(&2), None);
    /// ```
    pub fn load(&self, key: &K) -> Option<&V> {
        let (_, found) = self.search_node(key);
        self.value_at(found)
    }

    /// Get a mutable reference to the value stored under `key`.
    pub fn load_mut(&mut self, key: &K) -> Option<&mut V> {
        let (_, found) = self.search_node(key);
        if found == LEAF {
            return None;
        }
        let entry = self.pool.node(found).entry;
        self.pool.entry_mut(entry).item.as_mut().map(|(_, value)| value)
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search_node(key).1 != LEAF
    }
}

impl<K, V> RbMap<K, V> {
    /// Value stored behind node `id`; `None` for the leaf sentinel.
    pub(crate) fn value_at(&self, id: NodeId) -> Option<&V> {
        self.pool
            .try_entry(self.pool.node(id).entry)
            .and_then(|entry| entry.item.as_ref())
            .map(|(_, value)| value)
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let first = self.pool.entry(HELP_ENTRY).next;
        self.pool.entry(first).item.as_ref().map(|(k, v)| (k, v))
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let last = self.pool.entry(END_ENTRY).prev;
        self.pool.entry(last).item.as_ref().map(|(k, v)| (k, v))
    }

    /// Get statistics for the node pool.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_node_reports_parent_on_miss() {
        let mut map = RbMap::new();
        for key in [20, 10, 30] {
            map.store(key, ());
        }

        let (parent, found) = map.search_node(&25);
        assert_eq!(found, LEAF);
        assert_eq!(map.pool.key_at(parent), Some(&30));

        let (parent, found) = map.search_node(&20);
        assert_eq!(parent, NULL_NODE);
        assert_eq!(map.pool.key_at(found), Some(&20));
    }

    #[test]
    fn test_load_and_load_mut() {
        let mut map = RbMap::new();
        map.store("a", 1);
        map.store("b", 2);

        assert_eq!(map.load(&"a"), Some(&1));
        assert_eq!(map.load(&"z"), None);
        assert_eq!(map.load_mut(&"z"), None);

        if let Some(value) = map.load_mut(&"b") {
            *value += 40;
        }
        assert_eq!(map.load(&"b"), Some(&42));
        assert!(map.contains_key(&"a"));
        assert!(!map.contains_key(&"c"));
    }

    #[test]
    fn test_first_last_and_size() {
        let mut map = RbMap::new();
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);

        for key in [5, 3, 8, 1] {
            map.store(key, key * 2);
        }
        assert_eq!(map.first(), Some((&1, &2)));
        assert_eq!(map.last(), Some((&8, &16)));
        assert_eq!(map.size(), 4);
        assert_eq!(map.pool_stats().live_pairs, 4);
    }
}
