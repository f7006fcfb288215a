//! Prefix view into a compressed trie.
//!
//! This module provides the `PrefixView` type: the subtree reached by a key
//! prefix, with lookups restricted to it and a lazy iterator over the keys it
//! holds. Range search is a `PrefixView` collected into a set.

use std::fmt;
use std::marker::PhantomData;

use slotmap::SlotMap;

use crate::key_converter::{is_storable, TrieKey};
use crate::node::{Node, NodeId, NodeRef};
use crate::trie::CompressedTrie;

/// A lightweight view of the keys of a trie that start with a given prefix.
///
/// The prefix may end in the middle of an edge: the view then sits on the
/// node below that edge.
///
/// # Examples
///
/// ```
/// use patricia_set::CompressedTrie;
///
/// let mut trie = CompressedTrie::new();
/// trie.insert("hello").unwrap();
/// trie.insert("help").unwrap();
/// trie.insert("world").unwrap();
///
/// let view = trie.view_subtrie("hel");
/// assert!(view.exists());
/// assert_eq!(view.len(), 2);
/// assert!(view.contains_key("help"));
/// assert!(!view.contains_key("world"));
/// ```
#[derive(Clone)]
pub struct PrefixView<'a> {
    /// The source trie for this view
    trie: &'a CompressedTrie,

    /// The key prefix defining this view
    prefix: Vec<u8>,

    /// The node the prefix leads to, if any
    subtrie_node: Option<NodeId>,
}

/// An iterator over the keys under a node, in ascending byte order.
///
/// Yields each key without the sentinel, borrowed from the trie.
pub struct PrefixViewIter<'a> {
    nodes: &'a SlotMap<NodeId, Node>,
    stack: Vec<NodeId>,
}

/// An iterator over owned keys under a node.
pub struct Keys<'a, K> {
    inner: PrefixViewIter<'a>,
    _key_type: PhantomData<fn() -> K>,
}

impl<'a> PrefixView<'a> {
    pub(crate) fn new(trie: &'a CompressedTrie, prefix: &[u8]) -> Self {
        let subtrie_node = Self::find_subtrie_node(trie, prefix);
        PrefixView {
            trie,
            prefix: prefix.to_vec(),
            subtrie_node,
        }
    }

    /// Returns the prefix of this view.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the trie this view borrows.
    pub fn trie(&self) -> &'a CompressedTrie {
        self.trie
    }

    /// The node the prefix leads to. For a prefix ending mid-edge this is the
    /// node below that edge.
    pub fn node(&self) -> Option<NodeRef<'a>> {
        let nodes = &self.trie.nodes;
        self.subtrie_node.map(|id| NodeRef::new(nodes, id))
    }

    /// Returns `true` if at least one stored key starts with the prefix.
    pub fn exists(&self) -> bool {
        self.iter().next().is_some()
    }

    /// Number of stored keys starting with the prefix.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        !self.exists()
    }

    /// Returns `true` if `key` is stored and starts with the prefix.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        key.starts_with(&self.prefix) && self.trie.search(key)
    }

    /// Iterates over the keys in the view, in ascending byte order.
    pub fn iter(&self) -> PrefixViewIter<'a> {
        PrefixViewIter::new(&self.trie.nodes, self.subtrie_node)
    }

    /// Iterates over the keys in the view as owned keys.
    pub fn keys<K: TrieKey>(&self) -> Keys<'a, K> {
        Keys {
            inner: self.iter(),
            _key_type: PhantomData,
        }
    }

    // Descends along the prefix. The last edge may be only partly consumed.
    fn find_subtrie_node(trie: &CompressedTrie, prefix: &[u8]) -> Option<NodeId> {
        if !is_storable(prefix) {
            return None;
        }

        let mut pos = 0;
        let mut current = trie.root;
        while pos < prefix.len() {
            let child = trie.nodes[current].child(prefix[pos])?;
            let label = trie.nodes[child].label.as_bytes();

            let take = label.len().min(prefix.len() - pos);
            if prefix[pos..pos + take] != label[..take] {
                return None;
            }

            pos += take;
            current = child;
        }

        Some(current)
    }
}

impl fmt::Debug for PrefixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("node", &self.node())
            .finish()
    }
}

impl<'a> IntoIterator for &PrefixView<'a> {
    type Item = &'a [u8];
    type IntoIter = PrefixViewIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> PrefixViewIter<'a> {
    pub(crate) fn new(nodes: &'a SlotMap<NodeId, Node>, start: Option<NodeId>) -> Self {
        PrefixViewIter {
            nodes,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PrefixViewIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        while let Some(id) = self.stack.pop() {
            let node = &nodes[id];
            if !node.is_leaf() {
                // Reversed so the smallest byte is popped first.
                self.stack.extend(node.children.values().rev().copied());
                continue;
            }
            // An empty trie's root is a leaf but terminates nothing.
            if node.parent.is_none() {
                continue;
            }
            let path = node.label.path_bytes();
            return Some(&path[..path.len() - 1]);
        }
        None
    }
}

impl<K: TrieKey> Iterator for Keys<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(K::from_key_bytes)
    }
}
