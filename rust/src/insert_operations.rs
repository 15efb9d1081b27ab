//! INSERT operations for RbMap.
//!
//! This module contains key-value insertion, the splice of a new entry into
//! the ordered list, and the red-black insert fix-up.

use std::mem;

use crate::types::{Color, EntryId, NodeId, RbMap, HELP_ENTRY, LEAF, NULL_NODE};

impl<K: Ord, V> RbMap<K, V> {
    /// Insert `value` under `key`, overwriting any previous value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.store(1, "one");
    /// map.store(1, "uno");
    /// assert_eq!(map.load(&1), Some(&"uno"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn store(&mut self, key: K, value: V) {
        self.load_and_store(key, value);
    }

    /// Insert `value` under `key` and return the value it replaced.
    ///
    /// # Returns
    ///
    /// `Some(previous)` if the key already existed (its entry and every
    /// cursor to it are kept), `None` if a new entry was created.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(map.load_and_store("k", 1), None);
    /// assert_eq!(map.load_and_store("k", 2), Some(1));
    /// ```
    pub fn load_and_store(&mut self, key: K, value: V) -> Option<V> {
        let (parent, found) = self.search_node(&key);
        if found != LEAF {
            let entry = self.pool.node(found).entry;
            return self
                .pool
                .entry_mut(entry)
                .item
                .as_mut()
                .map(|(_, old)| mem::replace(old, value));
        }

        let goes_left = self.pool.key_at(parent).is_some_and(|parent_key| key < *parent_key);
        let node = self.pool.acquire(key, value);
        let entry = self.pool.node(node).entry;
        self.pool.node_mut(node).parent = parent;

        if parent == NULL_NODE {
            self.root = node;
            self.link_entry_after(HELP_ENTRY, entry);
        } else {
            let parent_entry = self.pool.node(parent).entry;
            if goes_left {
                self.pool.node_mut(parent).left = node;
                self.link_entry_before(parent_entry, entry);
            } else {
                self.pool.node_mut(parent).right = node;
                self.link_entry_after(parent_entry, entry);
            }
        }

        self.insert_fixup(node);
        self.len += 1;
        None
    }
}

impl<K, V> RbMap<K, V> {
    // ============================================================================
    // LIST SPLICING
    // ============================================================================

    /// Link `entry` into the list right after `anchor`.
    pub(crate) fn link_entry_after(&mut self, anchor: EntryId, entry: EntryId) {
        let next = self.pool.entry(anchor).next;
        {
            let record = self.pool.entry_mut(entry);
            record.prev = anchor;
            record.next = next;
        }
        self.pool.entry_mut(anchor).next = entry;
        self.pool.entry_mut(next).prev = entry;
    }

    /// Link `entry` into the list right before `anchor`.
    pub(crate) fn link_entry_before(&mut self, anchor: EntryId, entry: EntryId) {
        let prev = self.pool.entry(anchor).prev;
        self.link_entry_after(prev, entry);
    }

    // ============================================================================
    // REBALANCING
    // ============================================================================

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.pool.node(id).color == Color::Red
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        if id != LEAF {
            self.pool.node_mut(id).color = color;
        }
    }

    /// The other child of `id`'s parent.
    #[inline]
    pub(crate) fn sibling(&self, id: NodeId) -> NodeId {
        let parent = self.pool.node(self.pool.node(id).parent);
        if parent.left == id {
            parent.right
        } else {
            parent.left
        }
    }

    /// Restore the red-black invariants after `node` was attached red.
    fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = self.pool.node(node).parent;
            if parent == NULL_NODE {
                self.set_color(node, Color::Black);
                return;
            }
            if !self.is_red(parent) {
                return;
            }

            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.pool.node(parent).parent;
            let uncle = self.sibling(parent);
            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.pool.node(grandparent).left == parent {
                if self.pool.node(parent).right == node {
                    self.rotate_left(parent);
                    parent = node;
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                if self.pool.node(parent).left == node {
                    self.rotate_right(parent);
                    parent = node;
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_ascending_keeps_balance() {
        let mut map = RbMap::new();
        for i in 0..1000 {
            map.store(i, i * 2);
            assert!(map.check_invariants(), "invariants violated after storing {}", i);
        }
        assert_eq!(map.len(), 1000);
        assert!(!map.is_red(map.root));
    }

    #[test]
    fn test_store_descending_and_zigzag() {
        let mut map = RbMap::new();
        for i in (0..200).rev() {
            map.store(i, ());
        }
        for i in 0..200 {
            map.store(1000 + if i % 2 == 0 { i } else { 400 - i }, ());
        }
        assert!(map.check_invariants_detailed().is_ok());
        assert_eq!(map.len(), 400);
    }

    #[test]
    fn test_overwrite_keeps_entry_identity() {
        let mut map = RbMap::new();
        map.store(7, "a");
        let cursor = map.find(&7);

        assert_eq!(map.load_and_store(7, "b"), Some("a"));
        assert_eq!(map.value(cursor), Ok(&"b"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.pool_stats().total_pairs, 1);
    }

    #[test]
    fn test_new_entries_are_spliced_in_order() {
        let mut map = RbMap::new();
        for key in [50, 20, 80, 10, 30, 70, 90, 25] {
            map.store(key, ());
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![10, 20, 25, 30, 50, 70, 80, 90]);
    }
}
