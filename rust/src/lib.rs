//! Red-black tree ordered map with stable bidirectional cursors.
//!
//! [`RbMap`] keeps its entries in a red-black tree for O(log n) keyed access
//! and, in parallel, in a doubly linked list in key order. Cursors are handles
//! into that list: they step in O(1), survive every mutation that does not
//! remove their own entry, and are refused (`MapError::Invalid`) once it is
//! gone, even after its storage is recycled for another key.
//!
//! Nodes and entries live in an index-addressed pool with a free list, so
//! deletions recycle storage instead of freeing it.
//!
//! The map has no internal synchronization; wrap it in a lock to share it.
//!
//! # Examples
//!
//! ```
//! use rbmap::{MapError, RbMap, SearchMode};
//!
//! let mut map = RbMap::new();
//! for key in [1, 3, 5, 7, 9] {
//!     map.store(key, key * 10);
//! }
//!
//! let a = map.find(&3);
//! let b = map.find(&7);
//! map.delete(&5);
//! assert_eq!(map.key(a), Ok(&3));
//! assert_eq!(map.key(b), Ok(&7));
//!
//! let next = map.delete_at(a).unwrap();
//! assert_eq!(next, b);
//! assert_eq!(map.key(a), Err(MapError::Invalid));
//!
//! let floor = map.search(&8, SearchMode::LESS | SearchMode::EQUAL).unwrap();
//! assert_eq!(map.value(floor), Ok(&70));
//! ```

mod construction;
mod cursor;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod pool;
mod rotation;
mod search_operations;
mod types;
mod validation;

pub use construction::DEFAULT_CAPACITY;
pub use error::{MapError, MapResult};
pub use iteration::{Iter, Keys, Values};
pub use pool::PoolStats;
pub use types::{Cursor, EntryRef, RbMap, SearchMode};
