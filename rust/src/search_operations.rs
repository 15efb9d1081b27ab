//! Relational search for RbMap.
//!
//! Finds the tightest entry standing in a requested relation to a key:
//! strictly below, equal, strictly above, or one of the inclusive
//! combinations. A miss is reported as the end cursor.

use crate::error::{MapError, MapResult};
use crate::types::{Cursor, EntryId, RbMap, SearchMode, END_ENTRY, HELP_ENTRY, LEAF};

impl<K: Ord, V> RbMap<K, V> {
    /// Search for the entry matching `key` under `mode`.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to compare against
    /// * `mode` - Any combination of `LESS`, `EQUAL` and `GREATER` except
    ///   `LESS | GREATER`. An empty mode behaves as `EQUAL`.
    ///
    /// # Returns
    ///
    /// The cursor of the matching entry, the end cursor if none matches, or
    /// `MapError::IllegalSearchMode` for `LESS | GREATER`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{RbMap, SearchMode};
    ///
    /// let map: RbMap<i32, ()> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    ///
    /// let below = map.search(&15, SearchMode::LESS).unwrap();
    /// assert_eq!(map.key(below), Ok(&10));
    ///
    /// let at_or_above = map.search(&20, SearchMode::GREATER | SearchMode::EQUAL).unwrap();
    /// assert_eq!(map.key(at_or_above), Ok(&20));
    ///
    /// assert_eq!(map.search(&35, SearchMode::GREATER).unwrap(), map.end());
    /// assert!(map.search(&1, SearchMode::LESS | SearchMode::GREATER).is_err());
    /// ```
    pub fn search(&self, key: &K, mode: SearchMode) -> MapResult<Cursor> {
        if mode.is_illegal() {
            return Err(MapError::IllegalSearchMode(mode));
        }
        let less = mode.contains(SearchMode::LESS);
        let greater = mode.contains(SearchMode::GREATER);
        let equal = mode.contains(SearchMode::EQUAL) || (!less && !greater);
        if self.root == LEAF {
            return Ok(self.end());
        }

        let (parent, found) = self.search_node(key);
        if found != LEAF {
            let entry = self.pool.node(found).entry;
            let target = if equal {
                entry
            } else if less {
                self.before(entry)
            } else {
                self.pool.entry(entry).next
            };
            return Ok(self.cursor_for(target));
        }

        // Miss: the last visited node is the key's neighbour on one side.
        let anchor = self.pool.node(parent).entry;
        let anchor_below = self.pool.key_at(parent).is_some_and(|anchor_key| anchor_key < key);
        let target = if less {
            if anchor_below {
                anchor
            } else {
                self.before(anchor)
            }
        } else if greater {
            if anchor_below {
                self.pool.entry(anchor).next
            } else {
                anchor
            }
        } else {
            END_ENTRY
        };
        Ok(self.cursor_for(target))
    }

    /// Exact-match search; the end cursor if `key` is absent.
    ///
    /// Equivalent to `search(key, SearchMode::EQUAL)`, which cannot fail.
    pub fn find(&self, key: &K) -> Cursor {
        let (_, found) = self.search_node(key);
        if found == LEAF {
            return self.end();
        }
        self.cursor_for(self.pool.node(found).entry)
    }

    /// Predecessor of `entry` in list order, with the help sentinel mapped
    /// to the end marker.
    fn before(&self, entry: EntryId) -> EntryId {
        match self.pool.entry(entry).prev {
            HELP_ENTRY => END_ENTRY,
            prev => prev,
        }
    }
}
