//! Core types and data structures for RbMap.
//!
//! This module contains the fundamental data structures, id types and
//! constants used throughout the red-black tree implementation.

use crate::pool::NodePool;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Slot id of a tree node inside the pool.
pub type NodeId = u32;

/// Slot id of an entry record (cursor target) inside the pool.
pub type EntryId = u32;

/// Marks an absent parent (the root) or a detached record's node.
pub const NULL_NODE: NodeId = u32::MAX;

/// Marks an unlinked list position or a sentinel node's entry.
pub const NULL_ENTRY: EntryId = u32::MAX;

/// The shared leaf sentinel standing in for every absent child.
pub(crate) const LEAF: NodeId = 0;

/// List head preceding the first real entry.
pub(crate) const HELP_ENTRY: EntryId = 0;

/// List tail following the last real entry.
pub(crate) const END_ENTRY: EntryId = 1;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Ordered map backed by a red-black tree.
///
/// Every entry is mirrored by a record in a doubly linked list kept in key
/// order, so cursors can step forwards and backwards in O(1) and stay valid
/// across mutations that do not remove their own entry.
///
/// # Type Parameters
///
/// * `K` - Key type, must implement `Ord`
/// * `V` - Value type
///
/// # Examples
///
/// ```
/// use rbmap::{RbMap, SearchMode};
///
/// let mut map = RbMap::new();
/// map.store(10, "ten");
/// map.store(20, "twenty");
/// map.store(30, "thirty");
///
/// assert_eq!(map.load(&20), Some(&"twenty"));
/// assert_eq!(map.len(), 3);
///
/// // Relational search: greatest key strictly below 25
/// let cursor = map.search(&25, SearchMode::LESS).unwrap();
/// assert_eq!(map.key(cursor), Ok(&20));
/// ```
///
/// # Performance Characteristics
///
/// - **Store / load / delete**: O(log n)
/// - **Cursor step**: O(1)
/// - **Clean / reset / full range**: O(n)
pub struct RbMap<K, V> {
    /// Process-unique id stamped into every cursor handed out by this map.
    pub(crate) id: u32,
    /// Root node, `LEAF` when the map is empty.
    pub(crate) root: NodeId,
    /// Number of live entries.
    pub(crate) len: usize,
    /// Node and entry storage, including sentinels and the free list.
    pub(crate) pool: NodePool<K, V>,
}

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Tree vertex. Keys and values live in the paired entry record.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) color: Color,
    /// Record currently paired with this node.
    pub(crate) entry: EntryId,
}

impl Node {
    /// A detached red node paired with `entry`.
    pub(crate) fn new(entry: EntryId) -> Self {
        Self {
            parent: NULL_NODE,
            left: LEAF,
            right: LEAF,
            color: Color::Red,
            entry,
        }
    }

    /// The black leaf sentinel.
    pub(crate) fn leaf() -> Self {
        Self {
            parent: NULL_NODE,
            left: LEAF,
            right: LEAF,
            color: Color::Black,
            entry: NULL_ENTRY,
        }
    }
}

/// Entry record: the target of a [`Cursor`] and a link of the ordered list.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// Node currently paired with this record, `NULL_NODE` while pooled.
    pub(crate) node: NodeId,
    pub(crate) prev: EntryId,
    pub(crate) next: EntryId,
    /// Stamped on acquire; cursors from an earlier life of the slot mismatch.
    pub(crate) generation: u64,
    /// False while pooled and for the help sentinel.
    pub(crate) attached: bool,
    pub(crate) item: Option<(K, V)>,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn sentinel(attached: bool) -> Self {
        Self {
            node: NULL_NODE,
            prev: NULL_ENTRY,
            next: NULL_ENTRY,
            generation: 0,
            attached,
            item: None,
        }
    }
}

// ============================================================================
// CURSORS AND SEARCH MODES
// ============================================================================

/// Handle to one position of a map: a live entry or the end marker.
///
/// Cursors are plain `Copy` handles; all access goes through the owning map,
/// which checks that the handle still refers to the same logical entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) map: u32,
    pub(crate) entry: EntryId,
    pub(crate) generation: u64,
}

/// Bitmask selecting which relation a search accepts.
///
/// `LESS | GREATER` is rejected with
/// [`MapError::IllegalSearchMode`](crate::MapError::IllegalSearchMode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchMode(u8);

impl SearchMode {
    /// Strictly less than the key.
    pub const LESS: SearchMode = SearchMode(1);
    /// Equal to the key.
    pub const EQUAL: SearchMode = SearchMode(1 << 1);
    /// Strictly greater than the key.
    pub const GREATER: SearchMode = SearchMode(1 << 2);

    /// Returns true if every bit of `other` is set in `self`.
    pub fn contains(self, other: SearchMode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the mode asks for both strict directions at once.
    pub fn is_illegal(self) -> bool {
        self.contains(Self::LESS | Self::GREATER)
    }

    /// Raw bit representation.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl Default for SearchMode {
    fn default() -> Self {
        Self::EQUAL
    }
}

impl std::ops::BitOr for SearchMode {
    type Output = SearchMode;

    fn bitor(self, rhs: SearchMode) -> SearchMode {
        SearchMode(self.0 | rhs.0)
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (Self::LESS, "LESS"),
            (Self::EQUAL, "EQUAL"),
            (Self::GREATER, "GREATER"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("EMPTY")?;
        }
        Ok(())
    }
}

/// Borrowed view of one entry handed to [`RbMap::range`] visitors.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a, K, V> {
    pub(crate) cursor: Cursor,
    pub(crate) key: &'a K,
    pub(crate) value: &'a V,
}

impl<'a, K, V> EntryRef<'a, K, V> {
    /// Cursor positioned at this entry.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn key(&self) -> &'a K {
        self.key
    }

    pub fn value(&self) -> &'a V {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_combinations() {
        let le = SearchMode::LESS | SearchMode::EQUAL;
        assert!(le.contains(SearchMode::LESS));
        assert!(le.contains(SearchMode::EQUAL));
        assert!(!le.contains(SearchMode::GREATER));
        assert!(!le.is_illegal());
        assert!((SearchMode::LESS | SearchMode::GREATER).is_illegal());
        assert_eq!(SearchMode::default(), SearchMode::EQUAL);
    }

    #[test]
    fn test_search_mode_display() {
        assert_eq!(SearchMode::GREATER.to_string(), "GREATER");
        assert_eq!((SearchMode::LESS | SearchMode::EQUAL).to_string(), "LESS|EQUAL");
    }
}
