//! DELETE operations for RbMap.
//!
//! This module contains key removal, the two-child entry swap, the
//! red-black delete fix-up, and the bulk operations that empty the map.

use std::collections::BTreeMap;

use crate::types::{Color, EntryId, NodeId, RbMap, END_ENTRY, HELP_ENTRY, LEAF, NULL_NODE};

impl<K: Ord, V> RbMap<K, V> {
    /// Remove `key` and return its value.
    ///
    /// Cursors to other entries stay valid; cursors to the removed entry
    /// become `Invalid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.store(1, "one");
    /// assert_eq!(map.delete(&1), Some("one"));
    /// assert_eq!(map.delete(&1), None);
    /// assert_eq!(map.load(&1), None);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let (_, found) = self.search_node(key);
        if found == LEAF {
            return None;
        }
        self.remove_node(found).map(|(_, value)| value)
    }

    /// Drain every entry into a snapshot and leave the map empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let mut map: RbMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    /// let snapshot = map.clean();
    /// assert_eq!(snapshot.len(), 2);
    /// assert_eq!(snapshot[&1], "a");
    /// assert!(map.is_empty());
    /// ```
    pub fn clean(&mut self) -> BTreeMap<K, V> {
        let mut snapshot = BTreeMap::new();
        let drained = self.drain_entries(|key, value| {
            snapshot.insert(key, value);
        });
        tracing::debug!(map = self.id, drained, "cleaned map into snapshot");
        snapshot
    }
}

impl<K, V> RbMap<K, V> {
    /// Drop every entry and leave the map empty.
    ///
    /// Node pairs go back to the pool; every outstanding cursor except the
    /// end cursor becomes `Invalid`.
    pub fn reset(&mut self) {
        let drained = self.drain_entries(|_, _| {});
        tracing::debug!(map = self.id, drained, "reset map");
    }

    /// Release every live pair in list order, handing each item to `sink`.
    fn drain_entries<F>(&mut self, mut sink: F) -> usize
    where
        F: FnMut(K, V),
    {
        let mut drained = 0;
        let mut current = self.pool.entry(HELP_ENTRY).next;
        while current != END_ENTRY {
            let next = self.pool.entry(current).next;
            let node = self.pool.entry(current).node;
            if let Some((key, value)) = self.pool.release(node) {
                sink(key, value);
                drained += 1;
            }
            current = next;
        }

        self.root = LEAF;
        self.len = 0;
        self.pool.entry_mut(HELP_ENTRY).next = END_ENTRY;
        self.pool.entry_mut(END_ENTRY).prev = HELP_ENTRY;
        drained
    }

    /// Detach `entry` from the ordered list.
    pub(crate) fn unlink_entry(&mut self, entry: EntryId) {
        let (prev, next) = {
            let record = self.pool.entry(entry);
            (record.prev, record.next)
        };
        self.pool.entry_mut(prev).next = next;
        self.pool.entry_mut(next).prev = prev;
    }

    /// Remove the entry held by `target` from the tree and the list and
    /// release its pair. Returns the removed key and value.
    pub(crate) fn remove_node(&mut self, target: NodeId) -> Option<(K, V)> {
        let mut victim = target;
        let (left, right) = {
            let node = self.pool.node(target);
            (node.left, node.right)
        };
        if left != LEAF && right != LEAF {
            // The in-order successor has no left child. Swapping entries
            // moves the successor's entry up to `target` and leaves the
            // requested entry on the node that is spliced out.
            let successor_entry = self.pool.entry(self.pool.node(target).entry).next;
            let successor = self.pool.entry(successor_entry).node;
            self.pool.swap_entries(target, successor);
            victim = successor;
        }

        let (child, parent, color) = {
            let node = self.pool.node(victim);
            let child = if node.left != LEAF { node.left } else { node.right };
            (child, node.parent, node.color)
        };

        if parent == NULL_NODE {
            self.root = child;
            if child != LEAF {
                self.pool.node_mut(child).parent = NULL_NODE;
                self.set_color(child, Color::Black);
            }
        } else {
            if color == Color::Black {
                if self.is_red(child) {
                    self.set_color(child, Color::Black);
                } else {
                    // Rebalance around the victim while it still occupies
                    // its slot; rotations may give it a new parent.
                    self.delete_fixup(victim);
                }
            }

            let parent = self.pool.node(victim).parent;
            self.replace_child(parent, victim, child);
            if child != LEAF {
                self.pool.node_mut(child).parent = parent;
            }
        }

        let entry = self.pool.node(victim).entry;
        self.unlink_entry(entry);
        self.len -= 1;
        self.pool.release(victim)
    }

    /// Restore the black-height lost by removing the black leaf-level `node`.
    fn delete_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = self.pool.node(node).parent;
            if parent == NULL_NODE {
                return;
            }

            let node_is_left = self.pool.node(parent).left == node;
            let mut sibling = self.sibling(node);

            if self.is_red(sibling) {
                self.set_color(parent, Color::Red);
                self.set_color(sibling, Color::Black);
                if node_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                sibling = self.sibling(node);
            }

            let (near, far) = {
                let s = self.pool.node(sibling);
                if node_is_left {
                    (s.left, s.right)
                } else {
                    (s.right, s.left)
                }
            };

            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                if self.is_red(parent) {
                    self.set_color(parent, Color::Black);
                    return;
                }
                node = parent;
                continue;
            }

            let mut far = far;
            if !self.is_red(far) {
                // Near nephew is red: turn it into the far case.
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                if node_is_left {
                    self.rotate_right(sibling);
                } else {
                    self.rotate_left(sibling);
                }
                far = sibling;
                sibling = near;
            }

            let parent_color = self.pool.node(parent).color;
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            self.set_color(far, Color::Black);
            if node_is_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_leaf_inner_and_root() {
        let mut map: RbMap<i32, i32> = (1..=15).map(|i| (i, i * 10)).collect();

        assert_eq!(map.delete(&1), Some(10));
        assert!(map.check_invariants());

        let root_key = *map.pool.key_at(map.root).unwrap();
        assert_eq!(map.delete(&root_key), Some(root_key * 10));
        assert!(map.check_invariants());

        assert_eq!(map.delete(&8), if root_key == 8 { None } else { Some(80) });
        assert!(map.check_invariants_detailed().is_ok());
        assert_eq!(map.delete(&100), None);
    }

    #[test]
    fn test_two_child_delete_moves_successor_entry() {
        let mut map: RbMap<i32, &str> =
            [(2, "two"), (1, "one"), (3, "three")].into_iter().collect();
        let root = map.root;
        let successor_cursor = map.find(&3);

        assert_eq!(map.delete(&2), Some("two"));

        // The root node survives and now carries the successor's entry
        assert_eq!(map.root, root);
        assert_eq!(map.pool.key_at(root), Some(&3));
        assert_eq!(map.key(successor_cursor), Ok(&3));
        assert!(map.check_invariants());
    }

    #[test]
    fn test_delete_everything_drains_list() {
        let mut map: RbMap<i32, ()> = (0..64).map(|i| (i, ())).collect();
        for i in (0..64).step_by(3).chain((0..64).filter(|i| i % 3 != 0)) {
            assert!(map.delete(&i).is_some());
            assert!(map.check_invariants(), "invariants violated after deleting {}", i);
        }
        assert!(map.is_empty());
        assert_eq!(map.root, LEAF);
        assert_eq!(map.pool.entry(HELP_ENTRY).next, END_ENTRY);
        assert_eq!(map.pool.entry(END_ENTRY).prev, HELP_ENTRY);
        assert_eq!(map.pool_stats().free_pairs, 64);
    }

    #[test]
    fn test_clean_returns_snapshot() {
        let mut map: RbMap<i32, String> = (0..10).map(|i| (i, format!("v{}", i))).collect();
        let cursor = map.find(&4);

        let snapshot = map.clean();
        assert_eq!(snapshot.len(), 10);
        assert_eq!(snapshot.get(&4).map(String::as_str), Some("v4"));
        assert!(map.is_empty());
        assert_eq!(map.begin(), map.end());
        assert!(map.key(cursor).unwrap_err().is_invalid());
        assert!(map.clean().is_empty());
    }

    #[test]
    fn test_reset_recycles_pairs() {
        let mut map: RbMap<i32, i32> = (0..32).map(|i| (i, i)).collect();
        map.reset();
        assert!(map.is_empty());
        assert!(map.check_invariants());

        for i in 100..132 {
            map.store(i, i);
        }
        let stats = map.pool_stats();
        assert_eq!(stats.total_pairs, 32);
        assert_eq!(stats.free_pairs, 0);
    }
}
