//! Iterator implementations for RbMap.
//!
//! All traversal follows the ordered entry list, so no tree walking or stack
//! is needed: stepping is O(1) in both directions.

use std::iter::FusedIterator;

use crate::types::{EntryId, EntryRef, RbMap, END_ENTRY, HELP_ENTRY};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in key order.
pub struct Iter<'a, K, V> {
    map: &'a RbMap<K, V>,
    /// Next entry to yield from the front.
    front: EntryId,
    /// Next entry to yield from the back.
    back: EntryId,
    remaining: usize,
}

/// Iterator over keys in order.
pub struct Keys<'a, K, V> {
    items: Iter<'a, K, V>,
}

/// Iterator over values in key order.
pub struct Values<'a, K, V> {
    items: Iter<'a, K, V>,
}

// ============================================================================
// RBMAP ITERATION METHODS
// ============================================================================

impl<K, V> RbMap<K, V> {
    /// Visit entries front to back until `visit` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::RbMap;
    ///
    /// let map: RbMap<i32, i32> = (1..=10).map(|i| (i, i * i)).collect();
    /// let mut seen = Vec::new();
    /// map.range(|entry| {
    ///     seen.push(*entry.key());
    ///     *entry.value() < 16
    /// });
    /// assert_eq!(seen, vec![1, 2, 3, 4]);
    /// ```
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(EntryRef<'_, K, V>) -> bool,
    {
        let mut current = self.pool.entry(HELP_ENTRY).next;
        while current != END_ENTRY {
            let entry = self.pool.entry(current);
            let Some((key, value)) = entry.item.as_ref() else {
                break;
            };
            let view = EntryRef {
                cursor: self.cursor_for(current),
                key,
                value,
            };
            if !visit(view) {
                break;
            }
            current = entry.next;
        }
    }

    /// Returns an iterator over all key-value pairs in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            front: self.pool.entry(HELP_ENTRY).next,
            back: self.pool.entry(END_ENTRY).prev,
            remaining: self.len,
        }
    }

    /// Returns an iterator over all keys in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { items: self.iter() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { items: self.iter() }
    }
}

// ============================================================================
// ITER IMPLEMENTATION
// ============================================================================

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.map.pool.entry(self.front);
        let (key, value) = entry.item.as_ref()?;
        self.front = entry.next;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.map.pool.entry(self.back);
        let (key, value) = entry.item.as_ref()?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RbMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// KEY AND VALUE ITERATORS
// ============================================================================

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_is_sorted_and_exact() {
        let map: RbMap<i32, i32> = [5, 1, 4, 2, 3].into_iter().map(|k| (k, -k)).collect();
        let iter = map.iter();
        assert_eq!(iter.len(), 5);
        let items: Vec<_> = iter.map(|(k, v)| (*k, *v)).collect();
        assert_eq!(items, vec![(1, -1), (2, -2), (3, -3), (4, -4), (5, -5)]);

        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec![-1, -2, -3, -4, -5]);
    }

    #[test]
    fn test_double_ended_meet_in_middle() {
        let map: RbMap<i32, ()> = (0..6).map(|k| (k, ())).collect();
        let mut keys = map.keys();
        assert_eq!(keys.next(), Some(&0));
        assert_eq!(keys.next_back(), Some(&5));
        assert_eq!(keys.next(), Some(&1));
        assert_eq!(keys.next_back(), Some(&4));
        assert_eq!(keys.next(), Some(&2));
        assert_eq!(keys.next_back(), Some(&3));
        assert_eq!(keys.next(), None);
        assert_eq!(keys.next_back(), None);
    }

    #[test]
    fn test_range_visits_until_stopped() {
        let map: RbMap<i32, i32> = (0..10).map(|k| (k, k)).collect();

        let mut all = Vec::new();
        map.range(|entry| {
            all.push(*entry.key());
            true
        });
        assert_eq!(all, (0..10).collect::<Vec<_>>());

        let mut cursors = Vec::new();
        map.range(|entry| {
            cursors.push(entry.cursor());
            cursors.len() < 3
        });
        assert_eq!(cursors.len(), 3);
        assert_eq!(map.key(cursors[2]), Ok(&2));

        let empty: RbMap<i32, i32> = RbMap::new();
        empty.range(|_| panic!("empty map has no entries"));
    }

    #[test]
    fn test_into_iterator_for_reference() {
        let map: RbMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        let mut total = 0;
        for (_, value) in &map {
            total += value;
        }
        assert_eq!(total, 3);
    }
}
