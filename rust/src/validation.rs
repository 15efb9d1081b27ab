//! Validation utilities for RbMap.
//!
//! Invariant checking used by the test suites: BST order, red-black coloring,
//! black-height, parent links, entry pairing and list order.

use crate::types::{Color, NodeId, RbMap, END_ENTRY, HELP_ENTRY, LEAF, NULL_NODE};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord, V> RbMap<K, V> {
    /// Check if the map maintains all structural invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        if self.pool.node(LEAF).color != Color::Black {
            return Err("Leaf sentinel is not black".to_string());
        }
        if self.root != LEAF {
            if self.pool.node(self.root).color != Color::Black {
                return Err("Root is not black".to_string());
            }
            if self.pool.node(self.root).parent != NULL_NODE {
                return Err("Root has a parent".to_string());
            }
        }

        let mut in_order = Vec::with_capacity(self.len);
        self.check_subtree(self.root, None, None, &mut in_order)?;

        if in_order.len() != self.len {
            return Err(format!(
                "Tree holds {} nodes but map reports {} entries",
                in_order.len(),
                self.len
            ));
        }

        self.check_list_matches(&in_order)?;

        let stats = self.pool.stats();
        if stats.live_pairs != self.len {
            return Err(format!(
                "Pool reports {} live pairs but map holds {} entries",
                stats.live_pairs, self.len
            ));
        }

        Ok(())
    }

    /// Recursively check the subtree at `id` and return its black-height.
    /// Appends the subtree's nodes to `in_order`.
    fn check_subtree(
        &self,
        id: NodeId,
        min_key: Option<&K>,
        max_key: Option<&K>,
        in_order: &mut Vec<NodeId>,
    ) -> Result<usize, String> {
        if id == LEAF {
            return Ok(1);
        }

        let node = self.pool.node(id);
        let entry = self.pool.entry(node.entry);
        if entry.node != id || !entry.attached {
            return Err(format!("Node {} is not paired with its entry {}", id, node.entry));
        }
        let key = self
            .pool
            .key_at(id)
            .ok_or_else(|| format!("Node {} carries no key", id))?;

        if min_key.is_some_and(|min| key <= min) || max_key.is_some_and(|max| key >= max) {
            return Err(format!("Node {} breaks search order", id));
        }

        for child in [node.left, node.right] {
            if child != LEAF && self.pool.node(child).parent != id {
                return Err(format!("Child {} does not point back to parent {}", child, id));
            }
            if node.color == Color::Red && self.is_red(child) {
                return Err(format!("Red node {} has red child {}", id, child));
            }
        }

        let left_height = self.check_subtree(node.left, min_key, Some(key), in_order)?;
        in_order.push(id);
        let right_height = self.check_subtree(node.right, Some(key), max_key, in_order)?;

        if left_height != right_height {
            return Err(format!(
                "Node {} has black-height {} on the left but {} on the right",
                id, left_height, right_height
            ));
        }

        Ok(left_height + usize::from(node.color == Color::Black))
    }

    /// Check that the entry list walks the tree's nodes in in-order sequence.
    fn check_list_matches(&self, in_order: &[NodeId]) -> Result<(), String> {
        let mut prev = HELP_ENTRY;
        let mut current = self.pool.entry(HELP_ENTRY).next;

        for (position, &node) in in_order.iter().enumerate() {
            if current == END_ENTRY {
                return Err(format!("List ends after {} of {} entries", position, in_order.len()));
            }
            let entry = self.pool.entry(current);
            if entry.node != node {
                return Err(format!(
                    "List position {} holds node {} but in-order node is {}",
                    position, entry.node, node
                ));
            }
            if entry.prev != prev {
                return Err(format!("Entry {} has a broken prev link", current));
            }
            prev = current;
            current = entry.next;
        }

        if current != END_ENTRY {
            return Err("List is longer than the tree".to_string());
        }
        if self.pool.entry(END_ENTRY).prev != prev {
            return Err("End sentinel has a broken prev link".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_red_root() {
        let mut map: RbMap<i32, ()> = (0..3).map(|k| (k, ())).collect();
        assert!(map.check_invariants());
        let root = map.root;
        map.pool.node_mut(root).color = Color::Red;
        assert_eq!(
            map.check_invariants_detailed(),
            Err("Root is not black".to_string())
        );
    }

    #[test]
    fn test_detects_broken_list() {
        let mut map: RbMap<i32, ()> = (0..4).map(|k| (k, ())).collect();
        let first = map.pool.entry(HELP_ENTRY).next;
        let second = map.pool.entry(first).next;
        map.unlink_entry(second);
        assert!(!map.check_invariants());
    }
}
