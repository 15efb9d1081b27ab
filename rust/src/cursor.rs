//! Cursor operations for RbMap.
//!
//! A [`Cursor`] is a copyable handle `(map id, entry slot, generation)`. The
//! map resolves it on every access and refuses handles that belong to another
//! map, point at a pooled slot, or were issued for an earlier occupant of a
//! recycled slot.

use std::mem;

use crate::error::{MapError, MapResult};
use crate::types::{Cursor, Entry, EntryId, RbMap, END_ENTRY, HELP_ENTRY};

impl<K, V> RbMap<K, V> {
    /// Cursor at the entry with the smallest key, or `end()` if empty.
    pub fn begin(&self) -> Cursor {
        self.cursor_for(self.pool.entry(HELP_ENTRY).next)
    }

    /// The end marker. It never dereferences to an entry.
    pub fn end(&self) -> Cursor {
        self.cursor_for(END_ENTRY)
    }

    pub(crate) fn cursor_for(&self, entry: EntryId) -> Cursor {
        Cursor {
            map: self.id,
            entry,
            generation: self.pool.entry(entry).generation,
        }
    }

    /// Check that `cursor` still designates a live position of this map.
    fn resolve(&self, cursor: Cursor) -> MapResult<&Entry<K, V>> {
        if cursor.map != self.id {
            return Err(MapError::Invalid);
        }
        match self.pool.try_entry(cursor.entry) {
            Some(entry) if entry.attached && entry.generation == cursor.generation => Ok(entry),
            _ => Err(MapError::Invalid),
        }
    }

    /// Like `resolve`, but also rejects the end marker.
    fn resolve_item(&self, cursor: Cursor) -> MapResult<&(K, V)> {
        let entry = self.resolve(cursor)?;
        if cursor.entry == END_ENTRY {
            return Err(MapError::EndOfRange);
        }
        entry.item.as_ref().ok_or(MapError::Invalid)
    }

    /// Returns true if `cursor` designates a live entry or the end marker.
    pub fn is_valid(&self, cursor: Cursor) -> bool {
        self.resolve(cursor).is_ok()
    }

    /// Move one position forward. The end cursor stays at the end.
    ///
    /// # Errors
    ///
    /// `MapError::Invalid` if the cursor is detached.
    pub fn next(&self, cursor: Cursor) -> MapResult<Cursor> {
        let entry = self.resolve(cursor)?;
        if cursor.entry == END_ENTRY {
            return Ok(cursor);
        }
        Ok(self.cursor_for(entry.next))
    }

    /// Move one position backward. The first entry stays where it is; the
    /// end cursor moves to the last entry.
    ///
    /// # Errors
    ///
    /// `MapError::Invalid` if the cursor is detached.
    pub fn prev(&self, cursor: Cursor) -> MapResult<Cursor> {
        let entry = self.resolve(cursor)?;
        if entry.prev == HELP_ENTRY {
            return Ok(cursor);
        }
        Ok(self.cursor_for(entry.prev))
    }

    /// Key at the cursor.
    ///
    /// # Errors
    ///
    /// `MapError::Invalid` if detached, `MapError::EndOfRange` at the end.
    pub fn key(&self, cursor: Cursor) -> MapResult<&K> {
        self.resolve_item(cursor).map(|(key, _)| key)
    }

    /// Value at the cursor. Fails like [`key`](Self::key).
    pub fn value(&self, cursor: Cursor) -> MapResult<&V> {
        self.resolve_item(cursor).map(|(_, value)| value)
    }

    /// Mutable value at the cursor. Fails like [`key`](Self::key).
    pub fn value_mut(&mut self, cursor: Cursor) -> MapResult<&mut V> {
        self.resolve_item(cursor)?;
        self.pool
            .entry_mut(cursor.entry)
            .item
            .as_mut()
            .map(|(_, value)| value)
            .ok_or(MapError::Invalid)
    }

    /// Replace the value at the cursor and return the previous one.
    /// Fails like [`key`](Self::key).
    pub fn set_value(&mut self, cursor: Cursor, value: V) -> MapResult<V> {
        self.value_mut(cursor).map(|slot| mem::replace(slot, value))
    }

    /// Remove the entry at the cursor and return the cursor of the entry
    /// that followed it (`end()` if it was the last).
    ///
    /// Afterwards `cursor` itself is `Invalid`; cursors to every other entry
    /// remain valid.
    ///
    /// # Errors
    ///
    /// `MapError::Invalid` if detached, `MapError::EndOfRange` at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{MapError, RbMap};
    ///
    /// let mut map: RbMap<i32, ()> = [1, 3, 5, 7, 9].into_iter().map(|k| (k, ())).collect();
    /// let a = map.find(&3);
    /// let next = map.delete_at(a).unwrap();
    /// assert_eq!(map.key(next), Ok(&5));
    /// assert_eq!(map.key(a), Err(MapError::Invalid));
    /// ```
    pub fn delete_at(&mut self, cursor: Cursor) -> MapResult<Cursor> {
        self.resolve_item(cursor)?;
        let (node, next) = {
            let entry = self.pool.entry(cursor.entry);
            (entry.node, entry.next)
        };
        // The following entry may be moved onto `node` by the two-child
        // swap, but its slot and generation survive, so its cursor does too.
        let next = self.cursor_for(next);
        self.remove_node(node);
        Ok(next)
    }
}
