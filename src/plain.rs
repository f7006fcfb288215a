//! Uncompressed character trie.
//!
//! [`PlainTrie`] stores one byte per edge. It uses the same sentinel
//! terminal as [`CompressedTrie`](crate::CompressedTrie) and exists as a
//! baseline to measure the compressed trie against.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::iter;

use slotmap::SlotMap;

use crate::key_converter::{check_key, is_storable, TrieKey};
use crate::{NodeId, Result, SENTINEL};

#[derive(Debug)]
struct PlainNode {
    /// Byte on the edge into this node; unused on the root
    byte: u8,
    parent: Option<NodeId>,
    children: BTreeMap<u8, NodeId>,
}

impl PlainNode {
    fn new(byte: u8, parent: Option<NodeId>) -> Self {
        PlainNode {
            byte,
            parent,
            children: BTreeMap::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A mutable set of byte strings stored one byte per node.
///
/// # Examples
///
/// ```
/// use patricia_set::PlainTrie;
/// use std::collections::HashSet;
///
/// let mut trie = PlainTrie::new();
/// trie.insert("hello").unwrap();
/// trie.insert("help").unwrap();
///
/// assert!(trie.search("hello"));
/// assert!(!trie.search("hel"));
///
/// let hits: HashSet<String> = trie.range_search("he");
/// assert_eq!(hits.len(), 2);
/// ```
pub struct PlainTrie {
    nodes: SlotMap<NodeId, PlainNode>,
    root: NodeId,
    size: usize,
}

impl PlainTrie {
    /// Creates a new, empty trie.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(PlainNode::new(0, None));
        PlainTrie {
            nodes,
            root,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(PlainNode::new(0, None));
        self.size = 0;
    }

    /// Read-only access to the root node.
    pub fn root(&self) -> PlainNodeRef<'_> {
        PlainNodeRef {
            nodes: &self.nodes,
            id: self.root,
        }
    }

    /// Resolves a handle returned by [`insert`](Self::insert) or
    /// [`find`](Self::find).
    pub fn node(&self, id: NodeId) -> Option<PlainNodeRef<'_>> {
        if self.nodes.contains_key(id) {
            Some(PlainNodeRef {
                nodes: &self.nodes,
                id,
            })
        } else {
            None
        }
    }

    /// Inserts a key, returning the handle of its sentinel leaf. Inserting a
    /// present key returns the existing leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`](crate::Error::InvalidKey) if the key
    /// contains the sentinel byte.
    pub fn insert<Q>(&mut self, key: &Q) -> Result<NodeId>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        check_key(key)?;

        let mut current = self.root;
        let mut created = false;
        for &byte in key.iter().chain(iter::once(&SENTINEL)) {
            current = match self.nodes[current].children.get(&byte) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.insert(PlainNode::new(byte, Some(current)));
                    self.nodes[current].children.insert(byte, child);
                    created = true;
                    child
                }
            };
        }

        if created {
            self.size += 1;
        }
        Ok(current)
    }

    /// Returns `true` if the trie contains exactly this key.
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the handle of the sentinel leaf of `key`, if it is stored.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        if !is_storable(key) {
            return None;
        }
        let end = self.descend(key)?;
        self.nodes[end].children.get(&SENTINEL).copied()
    }

    /// Removes a key. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let mut current = match self.find(key) {
            Some(leaf) => leaf,
            None => return false,
        };

        // Detach nodes bottom-up until one still has other children.
        loop {
            let node = &self.nodes[current];
            let (byte, parent) = match node.parent {
                Some(parent) if node.is_leaf() => (node.byte, parent),
                _ => break,
            };
            self.nodes[parent].children.remove(&byte);
            self.nodes.remove(current);
            current = parent;
        }

        self.size -= 1;
        true
    }

    /// Returns every stored key that starts with `prefix`.
    pub fn range_search<K, Q>(&self, prefix: &Q) -> HashSet<K>
    where
        K: TrieKey + Hash + Eq,
        Q: AsRef<[u8]> + ?Sized,
    {
        let prefix = prefix.as_ref();
        let mut found = HashSet::new();
        if !is_storable(prefix) {
            return found;
        }
        let start = match self.descend(prefix) {
            Some(start) => start,
            None => return found,
        };

        let mut stack = vec![(prefix.to_vec(), start)];
        while let Some((path, id)) = stack.pop() {
            for (&byte, &child) in &self.nodes[id].children {
                if byte == SENTINEL {
                    found.insert(K::from_key_bytes(&path));
                } else {
                    let mut next = path.clone();
                    next.push(byte);
                    stack.push((next, child));
                }
            }
        }
        found
    }

    // Follows `bytes` from the root, one node per byte.
    fn descend(&self, bytes: &[u8]) -> Option<NodeId> {
        bytes.iter().try_fold(self.root, |current, byte| {
            self.nodes[current].children.get(byte).copied()
        })
    }
}

impl Default for PlainTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlainTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainTrie")
            .field("len", &self.size)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// A read-only handle to one node of a [`PlainTrie`].
#[derive(Clone, Copy)]
pub struct PlainNodeRef<'a> {
    nodes: &'a SlotMap<NodeId, PlainNode>,
    id: NodeId,
}

impl<'a> PlainNodeRef<'a> {
    fn node(&self) -> &'a PlainNode {
        &self.nodes[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The single byte on the edge into this node; empty for the root.
    pub fn label(&self) -> &'a [u8] {
        let node = self.node();
        if node.parent.is_none() {
            return &[];
        }
        std::slice::from_ref(&node.byte)
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn parent(&self) -> Option<PlainNodeRef<'a>> {
        let nodes = self.nodes;
        self.node().parent.map(|id| PlainNodeRef { nodes, id })
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// Children in ascending byte order.
    pub fn children(&self) -> impl Iterator<Item = PlainNodeRef<'a>> + 'a {
        let nodes = self.nodes;
        self.node()
            .children
            .values()
            .map(move |&id| PlainNodeRef { nodes, id })
    }
}

impl fmt::Debug for PlainNodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainNodeRef")
            .field("id", &self.id)
            .field("label", &self.label())
            .field("children", &self.child_count())
            .finish()
    }
}
