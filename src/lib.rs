//! # Patricia Set
//!
//! An in-memory set of byte strings with exact membership, prefix ("range")
//! search, insertion and removal, backed by a path-compressed trie.
//!
//! This crate provides two interchangeable structures:
//!
//! - [`CompressedTrie`]: a Patricia (radix) trie whose edges carry
//!   multi-byte labels. Labels are zero-copy views into the inserted keys;
//!   inserting splits edges and removing splices single-child nodes back
//!   into their child.
//! - [`PlainTrie`]: the uncompressed baseline with one byte per edge.
//!
//! Both append [`SENTINEL`] to every key before storing it, so the terminal of
//! each key is a leaf and no stored key is a proper prefix of another inside
//! the tree. Keys containing the sentinel byte are rejected.
//!
//! ## Example
//!
//! ```rust
//! use patricia_set::CompressedTrie;
//! use std::collections::HashSet;
//!
//! let mut trie = CompressedTrie::new();
//! trie.insert("hello").unwrap();
//! trie.insert("help").unwrap();
//! trie.insert("world").unwrap();
//!
//! assert!(trie.search("hello"));
//! assert!(!trie.search("hel"));
//!
//! let hits: HashSet<String> = trie.range_search("hel");
//! assert_eq!(hits.len(), 2);
//!
//! assert!(trie.remove("hello"));
//! assert!(!trie.search("hello"));
//! ```
//!
//! Neither trie is synchronized. Wrap the whole structure in a lock to share
//! it between threads.

use std::collections::HashSet;

mod key_converter;
mod label;
mod node;
mod plain;
mod prefix_view;
mod trie;
mod util;

// Re-export public types
pub use crate::key_converter::TrieKey;
pub use crate::node::{NodeId, NodeRef};
pub use crate::plain::{PlainNodeRef, PlainTrie};
pub use crate::prefix_view::{Keys, PrefixView, PrefixViewIter};
pub use crate::trie::CompressedTrie;

/// Byte appended to every stored key to mark its end. User keys must not
/// contain it.
pub const SENTINEL: u8 = 0x00;

/// Errors that can occur in trie operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Key contains the sentinel byte and cannot be stored
    #[error("key contains the reserved sentinel byte at position {position}")]
    InvalidKey { position: usize },
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// The operations shared by both tries.
///
/// Lets callers such as benchmarks drive either structure through one
/// interface.
///
/// ```rust
/// use patricia_set::{CompressedTrie, PlainTrie, PrefixIndex};
///
/// fn load<T: PrefixIndex + Default>(words: &[&str]) -> T {
///     let mut index = T::default();
///     for word in words {
///         index.insert(word.as_bytes()).unwrap();
///     }
///     index
/// }
///
/// let plain: PlainTrie = load(&["tea", "ten"]);
/// let compressed: CompressedTrie = load(&["tea", "ten"]);
/// assert_eq!(
///     PrefixIndex::range_search(&plain, b"te"),
///     PrefixIndex::range_search(&compressed, b"te"),
/// );
/// ```
pub trait PrefixIndex {
    /// Inserts a key and returns the handle of its terminal node.
    fn insert(&mut self, key: &[u8]) -> Result<NodeId>;

    /// Exact membership test.
    fn search(&self, key: &[u8]) -> bool;

    /// Removes a key, returning `true` if it was present.
    fn remove(&mut self, key: &[u8]) -> bool;

    /// Every stored key starting with `prefix`.
    fn range_search(&self, prefix: &[u8]) -> HashSet<Vec<u8>>;

    /// Number of stored keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PrefixIndex for CompressedTrie {
    fn insert(&mut self, key: &[u8]) -> Result<NodeId> {
        CompressedTrie::insert(self, key)
    }

    fn search(&self, key: &[u8]) -> bool {
        CompressedTrie::search(self, key)
    }

    fn remove(&mut self, key: &[u8]) -> bool {
        CompressedTrie::remove(self, key)
    }

    fn range_search(&self, prefix: &[u8]) -> HashSet<Vec<u8>> {
        CompressedTrie::range_search(self, prefix)
    }

    fn len(&self) -> usize {
        CompressedTrie::len(self)
    }
}

impl PrefixIndex for PlainTrie {
    fn insert(&mut self, key: &[u8]) -> Result<NodeId> {
        PlainTrie::insert(self, key)
    }

    fn search(&self, key: &[u8]) -> bool {
        PlainTrie::search(self, key)
    }

    fn remove(&mut self, key: &[u8]) -> bool {
        PlainTrie::remove(self, key)
    }

    fn range_search(&self, prefix: &[u8]) -> HashSet<Vec<u8>> {
        PlainTrie::range_search(self, prefix)
    }

    fn len(&self) -> usize {
        PlainTrie::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<T: PrefixIndex + Default>() {
        let mut index = T::default();
        assert!(index.is_empty());

        index.insert(b"hello").unwrap();
        index.insert(b"help").unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.search(b"help"));
        assert!(!index.search(b"hel"));

        let hits = index.range_search(b"hel");
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&b"hello".to_vec()));

        assert!(index.remove(b"help"));
        assert!(!index.remove(b"help"));
        assert_eq!(index.len(), 1);

        assert!(index.insert(b"a\0b").is_err());
    }

    #[test]
    fn test_prefix_index_compressed() {
        exercise::<CompressedTrie>();
    }

    #[test]
    fn test_prefix_index_plain() {
        exercise::<PlainTrie>();
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidKey { position: 3 };
        assert_eq!(
            err.to_string(),
            "key contains the reserved sentinel byte at position 3"
        );
    }
}
