//! Error handling and result types for RbMap operations.
//!
//! Only cursor access and search-mode validation can fail. Key misses and
//! empty maps are reported through `Option` or the end cursor.

use crate::types::SearchMode;
use thiserror::Error;

/// Error type for cursor and search operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The cursor no longer refers to a live entry of this map.
    ///
    /// Raised after the entry was deleted (even if its slot was reused for a
    /// new key), after `clean`/`reset`, or for a cursor from another map.
    #[error("cursor is detached from any live entry")]
    Invalid,
    /// The cursor is the end marker, which has no key or value.
    #[error("cursor is at the end of the map")]
    EndOfRange,
    /// Both strict directions were requested at once.
    #[error("illegal search mode {0}: LESS and GREATER are mutually exclusive")]
    IllegalSearchMode(SearchMode),
}

impl MapError {
    /// Check if this error reports a detached cursor
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Check if this error reports the end marker
    pub fn is_end_of_range(&self) -> bool {
        matches!(self, Self::EndOfRange)
    }
}

/// Result type for cursor and search operations
pub type MapResult<T> = Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MapError::Invalid.to_string(),
            "cursor is detached from any live entry"
        );
        let err = MapError::IllegalSearchMode(SearchMode::LESS | SearchMode::GREATER);
        assert_eq!(
            err.to_string(),
            "illegal search mode LESS|GREATER: LESS and GREATER are mutually exclusive"
        );
        assert!(MapError::Invalid.is_invalid());
        assert!(MapError::EndOfRange.is_end_of_range());
        assert!(!MapError::EndOfRange.is_invalid());
    }
}
