//! The compressed trie implementation.
//!
//! This module contains [`CompressedTrie`], the path-compressed (Patricia)
//! trie that backs the string set, together with its insertion, removal and
//! membership algorithms. Prefix enumeration lives in
//! [`prefix_view`](crate::prefix_view).

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use slotmap::SlotMap;

use crate::key_converter::{check_key, is_storable, terminated, TrieKey};
use crate::label::Label;
use crate::node::{Node, NodeId, NodeRef};
use crate::prefix_view::{PrefixView, PrefixViewIter};
use crate::util::{matches_label, prefix_match};
use crate::Result;

/// A mutable set of byte strings stored in a path-compressed trie.
///
/// Every key is stored with [`SENTINEL`](crate::SENTINEL) appended, so no
/// stored key is a proper prefix of another inside the tree and the terminal
/// of each key is a leaf. Edges carry multi-byte labels that view the
/// inserted keys' own buffers; splitting and merging edges only moves
/// offsets.
///
/// # Examples
///
/// ```
/// use patricia_set::CompressedTrie;
/// use std::collections::HashSet;
///
/// let mut trie = CompressedTrie::new();
/// trie.insert("hello").unwrap();
/// trie.insert("help").unwrap();
///
/// assert!(trie.search("help"));
/// assert!(!trie.search("hel"));
///
/// let hits: HashSet<String> = trie.range_search("hel");
/// assert_eq!(hits.len(), 2);
/// ```
pub struct CompressedTrie {
    /// Node pool; the root is always live
    pub(crate) nodes: SlotMap<NodeId, Node>,

    pub(crate) root: NodeId,

    /// The number of keys stored in the trie
    size: usize,
}

impl CompressedTrie {
    /// Creates a new, empty trie.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::root());
        CompressedTrie {
            nodes,
            root,
            size: 0,
        }
    }

    /// Returns the number of keys stored in the trie.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes every key. Handles returned earlier become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(Node::root());
        self.size = 0;
    }

    /// Read-only access to the root node, for walking the tree.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.nodes, self.root)
    }

    /// Resolves a handle returned by [`insert`](Self::insert) or
    /// [`find`](Self::find). Returns `None` once the node has been removed.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if self.nodes.contains_key(id) {
            Some(NodeRef::new(&self.nodes, id))
        } else {
            None
        }
    }

    /// Returns `true` if the trie contains exactly this key.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_set::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// trie.insert("help").unwrap();
    ///
    /// assert!(trie.search("help"));
    /// assert!(!trie.search("hel"));
    /// assert!(!trie.search("helps"));
    /// ```
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the handle of the leaf terminating `key`, if it is stored.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        if !is_storable(key) {
            return None;
        }
        let query = terminated(key);

        let mut pos = 0;
        let mut current = self.root;
        while pos < query.len() {
            let child = self.nodes[current].child(query[pos])?;
            let label = self.nodes[child].label.as_bytes();
            if !matches_label(&query, pos, label) {
                return None;
            }
            pos += label.len();
            current = child;
        }

        debug_assert!(self.nodes[current].is_leaf());
        Some(current)
    }

    /// Inserts a key, returning the handle of its terminal leaf.
    ///
    /// Inserting a key that is already present changes nothing and returns
    /// the existing leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`](crate::Error::InvalidKey) if the key
    /// contains the sentinel byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_set::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// let first = trie.insert("alpha").unwrap();
    /// let again = trie.insert("alpha").unwrap();
    ///
    /// assert_eq!(first, again);
    /// assert_eq!(trie.len(), 1);
    /// assert!(trie.insert("al\0pha").is_err());
    /// ```
    pub fn insert<Q>(&mut self, key: &Q) -> Result<NodeId>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        check_key(key)?;
        let source = terminated(key);

        let mut pos = 0;
        let mut current = self.root;
        loop {
            let child = match self.nodes[current].child(source[pos]) {
                Some(child) => child,
                None => return Ok(self.attach_leaf(current, &source, pos)),
            };

            let label_len = self.nodes[child].label.len();
            let common = prefix_match(&source, pos, self.nodes[child].label.as_bytes());

            if common == label_len {
                pos += common;
                if pos == source.len() {
                    debug_assert!(self.nodes[child].is_leaf());
                    return Ok(child);
                }
                current = child;
                continue;
            }

            // The sentinel guarantees the key and the label diverge before
            // either runs out.
            debug_assert!(common > 0 && pos + common < source.len());
            let middle = self.split_edge(current, child, common);
            return Ok(self.attach_leaf(middle, &source, pos + common));
        }
    }

    /// Removes a key. Returns `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_set::CompressedTrie;
    ///
    /// let mut trie = CompressedTrie::new();
    /// trie.insert("prefix").unwrap();
    /// trie.insert("pref").unwrap();
    ///
    /// assert!(trie.remove("prefix"));
    /// assert!(!trie.remove("prefix"));
    /// assert!(trie.search("pref"));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let leaf = match self.find(key) {
            Some(leaf) => leaf,
            None => return false,
        };
        let parent = match self.nodes[leaf].parent {
            Some(parent) => parent,
            None => unreachable!("a terminal leaf is never the root"),
        };

        self.unlink(parent, leaf);
        let removed = match self.nodes.remove(leaf) {
            Some(node) => node,
            None => unreachable!("leaf was resolved above"),
        };
        self.size -= 1;

        if let Some(survivor) = self.compact(parent) {
            self.release_source(removed.label.source(), survivor);
        }
        true
    }

    /// Returns every stored key that starts with `prefix`.
    ///
    /// An empty prefix returns every key. A prefix containing the sentinel
    /// byte matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use patricia_set::CompressedTrie;
    /// use std::collections::HashSet;
    ///
    /// let mut trie = CompressedTrie::new();
    /// for word in ["hello", "help", "hell", "world"] {
    ///     trie.insert(word).unwrap();
    /// }
    ///
    /// let hits: HashSet<String> = trie.range_search("hel");
    /// let expected: HashSet<String> =
    ///     ["hello", "help", "hell"].iter().map(|s| s.to_string()).collect();
    /// assert_eq!(hits, expected);
    /// ```
    pub fn range_search<K, Q>(&self, prefix: &Q) -> HashSet<K>
    where
        K: TrieKey + Hash + Eq,
        Q: AsRef<[u8]> + ?Sized,
    {
        self.view_subtrie(prefix).keys().collect()
    }

    /// Creates a view of the keys under the given prefix.
    pub fn view_subtrie<Q>(&self, prefix: &Q) -> PrefixView<'_>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        PrefixView::new(self, prefix.as_ref())
    }

    /// Iterates over every stored key in ascending byte order.
    pub fn iter(&self) -> PrefixViewIter<'_> {
        PrefixViewIter::new(&self.nodes, Some(self.root))
    }

    /// Collects every stored key into owned keys, in ascending byte order.
    pub fn keys<K: TrieKey>(&self) -> Vec<K> {
        self.iter().map(K::from_key_bytes).collect()
    }

    // Creates a leaf for `source[pos..]` under `parent`.
    fn attach_leaf(&mut self, parent: NodeId, source: &Arc<[u8]>, pos: usize) -> NodeId {
        let label = Label::new(Arc::clone(source), pos, source.len() - pos);
        let leaf = self.nodes.insert(Node::new(label, parent));
        self.link(parent, leaf);
        self.size += 1;
        leaf
    }

    // Splits the edge into `child` after its first `k` bytes. A new branch
    // node takes the first `k` bytes and `child` (with its whole subtree)
    // hangs below it with the rest. Returns the branch node.
    fn split_edge(&mut self, parent: NodeId, child: NodeId, k: usize) -> NodeId {
        let front = self.nodes[child].label.split_front(k);
        tracing::trace!(
            start = front.start(),
            split = k,
            rest = self.nodes[child].label.len(),
            "splitting edge"
        );

        let middle = self.nodes.insert(Node::new(front, parent));
        // Same first byte as `child`, so this replaces it in `parent`.
        self.link(parent, middle);
        self.link(middle, child);
        middle
    }

    // Restores the branching invariant upward from `start` after one of its
    // children was detached. Returns a live node below the last node touched,
    // if any is left, for `release_source` to start from.
    fn compact(&mut self, start: NodeId) -> Option<NodeId> {
        let mut current = start;
        loop {
            let node = &self.nodes[current];
            let parent = match node.parent {
                Some(parent) => parent,
                // The root may keep any number of children.
                None => return node.children.values().next().copied(),
            };

            match node.children.len() {
                0 => {
                    self.unlink(parent, current);
                    self.nodes.remove(current);
                    current = parent;
                }
                1 => {
                    let only = node.only_child();
                    return only.map(|only| self.splice(parent, current, only));
                }
                _ => return node.children.values().next().copied(),
            }
        }
    }

    // Removes the single-child `node` and grows its child's label backward
    // over the removed label. Returns the child.
    fn splice(&mut self, parent: NodeId, node: NodeId, only: NodeId) -> NodeId {
        self.unlink(parent, node);
        let removed = match self.nodes.remove(node) {
            Some(removed) => removed,
            None => unreachable!("spliced node is live"),
        };

        let absorbed = removed.label.len();
        self.nodes[only].label.extend_back(absorbed);
        tracing::trace!(
            absorbed,
            start = self.nodes[only].label.start(),
            len = self.nodes[only].label.len(),
            "splicing single-child node"
        );
        self.link(parent, only);
        only
    }

    // Re-points every ancestor of `from` whose label still views `removed`
    // at the buffer `from` views. The offsets stay valid because all
    // buffers below a node agree with its path.
    fn release_source(&mut self, removed: &Arc<[u8]>, from: NodeId) {
        let replacement = Arc::clone(self.nodes[from].label.source());
        let mut rebased = 0usize;

        let mut current = self.nodes[from].parent;
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            if node.label.shares_source(removed) {
                node.label.rebase(Arc::clone(&replacement));
                rebased += 1;
            }
            current = node.parent;
        }

        if rebased > 0 {
            tracing::debug!(rebased, "released buffer of removed key");
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        let byte = self.nodes[child].first_byte();
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.insert(byte, child);
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        let byte = self.nodes[child].first_byte();
        let detached = self.nodes[parent].children.remove(&byte);
        debug_assert_eq!(detached, Some(child));
        self.nodes[child].parent = None;
    }
}

impl Default for CompressedTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompressedTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

impl<K: AsRef<[u8]>> Extend<K> for CompressedTrie {
    /// Inserts every key. Keys that contain the sentinel are skipped and
    /// logged at debug level rather than reported.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        let mut skipped = 0usize;
        for key in iter {
            if let Err(err) = self.insert(key.as_ref()) {
                tracing::debug!(%err, "extend skipped key");
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "extend skipped keys containing the sentinel");
        }
    }
}

impl<'a> IntoIterator for &'a CompressedTrie {
    type Item = &'a [u8];
    type IntoIter = PrefixViewIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
