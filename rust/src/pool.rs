//! Node pool: arena storage for node+entry pairs with a free list.
//!
//! Slots are addressed by `u32` ids. Node slot 0 is the leaf sentinel and
//! entry slots 0 and 1 are the help and end sentinels; none of them is ever
//! handed out by `acquire`. A pair released to the free list keeps its slots
//! bound to each other and is reused as a unit.

use crate::types::{
    Color, Entry, EntryId, Node, NodeId, END_ENTRY, HELP_ENTRY, LEAF, NULL_ENTRY, NULL_NODE,
};

/// Statistics for a node pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolStats {
    /// Pairs ever allocated (live plus pooled), sentinels excluded.
    pub total_pairs: usize,
    pub live_pairs: usize,
    pub free_pairs: usize,
    /// live / total, 0.0 for a pool that never allocated.
    pub utilization: f64,
}

/// Arena of node+entry pairs.
#[derive(Debug, Clone)]
pub(crate) struct NodePool<K, V> {
    nodes: Vec<Node>,
    entries: Vec<Entry<K, V>>,
    /// Pooled node ids; each still points at its paired entry.
    free_list: Vec<NodeId>,
    /// Last generation stamped on an acquired entry.
    generation: u64,
}

impl<K, V> NodePool<K, V> {
    /// Create a pool holding only the sentinels
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a pool with room for `capacity` pairs before reallocating
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::leaf());

        let mut entries = Vec::with_capacity(capacity + 2);
        entries.push(Entry::sentinel(false));
        entries.push(Entry::sentinel(true));
        entries[HELP_ENTRY as usize].next = END_ENTRY;
        entries[END_ENTRY as usize].prev = HELP_ENTRY;

        Self {
            nodes,
            entries,
            free_list: Vec::new(),
            generation: 0,
        }
    }

    /// Take a pair from the free list (or allocate one) and load it with
    /// `key`/`value`. Returns the node id; the entry is `node(id).entry`.
    pub(crate) fn acquire(&mut self, key: K, value: V) -> NodeId {
        self.generation += 1;

        let id = match self.free_list.pop() {
            Some(id) => {
                tracing::trace!(node = id, generation = self.generation, "reusing pooled node");
                id
            }
            None => {
                let id = NodeId::try_from(self.nodes.len()).expect("Index should fit in NodeId");
                let entry = EntryId::try_from(self.entries.len()).expect("Index should fit in EntryId");
                self.entries.push(Entry::sentinel(false));
                self.nodes.push(Node::new(entry));
                tracing::trace!(node = id, entry, "allocated node pair");
                id
            }
        };

        let entry_id = self.nodes[id as usize].entry;
        let generation = self.generation;
        let entry = self.entry_mut(entry_id);
        entry.node = id;
        entry.prev = NULL_ENTRY;
        entry.next = NULL_ENTRY;
        entry.generation = generation;
        entry.attached = true;
        entry.item = Some((key, value));
        id
    }

    /// Reset the pair currently holding node `id` and return it to the pool.
    ///
    /// The entry loses its node back-reference, its list links and its item,
    /// so every cursor to it reads as detached from now on.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<(K, V)> {
        debug_assert!(id != LEAF, "the leaf sentinel is never released");
        let node = self.node_mut(id);
        node.parent = NULL_NODE;
        node.left = LEAF;
        node.right = LEAF;
        node.color = Color::Red;
        let entry_id = node.entry;

        let entry = self.entry_mut(entry_id);
        entry.node = NULL_NODE;
        entry.prev = NULL_ENTRY;
        entry.next = NULL_ENTRY;
        entry.attached = false;
        let item = entry.item.take();

        self.free_list.push(id);
        item
    }

    /// Exchange the entries paired with nodes `a` and `b`.
    ///
    /// Entries keep their list position, generation and item; only the
    /// node↔entry pairing changes.
    pub(crate) fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        let entry_a = self.node(a).entry;
        let entry_b = self.node(b).entry;
        self.node_mut(a).entry = entry_b;
        self.node_mut(b).entry = entry_a;
        self.entry_mut(entry_b).node = a;
        self.entry_mut(entry_a).node = b;
    }

    // ============================================================================
    // SLOT ACCESS
    // ============================================================================

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        debug_assert!(id != LEAF, "the leaf sentinel is never mutated");
        &mut self.nodes[id as usize]
    }

    #[inline]
    pub(crate) fn entry(&self, id: EntryId) -> &Entry<K, V> {
        &self.entries[id as usize]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, id: EntryId) -> &mut Entry<K, V> {
        &mut self.entries[id as usize]
    }

    /// Bounds-checked entry lookup for ids coming from outside the crate.
    #[inline]
    pub(crate) fn try_entry(&self, id: EntryId) -> Option<&Entry<K, V>> {
        self.entries.get(usize::try_from(id).ok()?)
    }

    /// Key stored behind node `id`; `None` for the leaf sentinel and for
    /// `NULL_NODE`.
    #[inline]
    pub(crate) fn key_at(&self, id: NodeId) -> Option<&K> {
        let entry = self.nodes.get(id as usize)?.entry;
        self.entries
            .get(entry as usize)
            .and_then(|entry| entry.item.as_ref())
            .map(|(key, _)| key)
    }

    // ============================================================================
    // STATISTICS
    // ============================================================================

    /// Number of pairs sitting in the free list.
    pub(crate) fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Number of pairs ever allocated, sentinels excluded.
    pub(crate) fn total_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Get pool statistics
    pub(crate) fn stats(&self) -> PoolStats {
        let total_pairs = self.total_count();
        let free_pairs = self.free_count();
        let live_pairs = total_pairs - free_pairs;
        let utilization = if total_pairs > 0 {
            live_pairs as f64 / total_pairs as f64
        } else {
            0.0
        };

        PoolStats {
            total_pairs,
            live_pairs,
            free_pairs,
            utilization,
        }
    }
}

impl<K, V> Default for NodePool<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_holds_only_sentinels() {
        let pool: NodePool<i32, i32> = NodePool::new();
        assert_eq!(pool.total_count(), 0);
        assert_eq!(pool.entry(HELP_ENTRY).next, END_ENTRY);
        assert_eq!(pool.entry(END_ENTRY).prev, HELP_ENTRY);
        assert!(!pool.entry(HELP_ENTRY).attached);
        assert!(pool.entry(END_ENTRY).attached);
        assert_eq!(pool.key_at(LEAF), None);
    }

    #[test]
    fn test_acquire_release_reuses_pair() {
        let mut pool = NodePool::new();

        let a = pool.acquire(1, "one");
        let entry_a = pool.node(a).entry;
        assert_eq!(pool.key_at(a), Some(&1));
        assert_eq!(pool.entry(entry_a).node, a);
        let first_generation = pool.entry(entry_a).generation;

        assert_eq!(pool.release(a), Some((1, "one")));
        assert!(!pool.entry(entry_a).attached);
        assert_eq!(pool.entry(entry_a).node, NULL_NODE);
        assert_eq!(pool.free_count(), 1);

        // The same pair comes back with a new generation
        let b = pool.acquire(2, "two");
        assert_eq!(b, a);
        assert_eq!(pool.node(b).entry, entry_a);
        assert!(pool.entry(entry_a).generation > first_generation);
        assert_eq!(pool.free_count(), 0);

        let stats = pool.stats();
        assert_eq!(stats.total_pairs, 1);
        assert_eq!(stats.live_pairs, 1);
        assert_eq!(stats.utilization, 1.0);
    }

    #[test]
    fn test_swap_entries_rebinds_pairs() {
        let mut pool = NodePool::new();
        let a = pool.acquire(1, 10);
        let b = pool.acquire(2, 20);
        let (entry_a, entry_b) = (pool.node(a).entry, pool.node(b).entry);

        pool.swap_entries(a, b);

        assert_eq!(pool.node(a).entry, entry_b);
        assert_eq!(pool.node(b).entry, entry_a);
        assert_eq!(pool.entry(entry_a).node, b);
        assert_eq!(pool.key_at(a), Some(&2));
        assert_eq!(pool.key_at(b), Some(&1));
    }
}
