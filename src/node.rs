//! Node storage for the compressed trie.
//!
//! This module contains the internal `Node` record and the public, read-only
//! [`NodeRef`] handle used to walk a [`CompressedTrie`](crate::CompressedTrie)
//! from the outside (for instance to render it).

use std::collections::BTreeMap;
use std::fmt;

use slotmap::SlotMap;

use crate::label::Label;
use crate::SENTINEL;

slotmap::new_key_type! {
    /// Handle to a node stored in a trie.
    ///
    /// Handles stay valid until the node they name is removed from the trie.
    /// After that, looking them up yields `None`, even once the slot is reused.
    pub struct NodeId;
}

/// Internal node type for the compressed trie.
///
/// Each node carries one edge label, a back-link to its parent and its
/// children indexed by the first byte of their label. A node is a terminal
/// exactly when it is a leaf: its label then ends with the sentinel.
#[derive(Debug)]
pub(crate) struct Node {
    /// The edge label leading into this node (empty for the root)
    pub label: Label,

    /// Non-owning back-link, `None` only for the root
    pub parent: Option<NodeId>,

    /// Child nodes indexed by the first byte of their label
    pub children: BTreeMap<u8, NodeId>,
}

impl Node {
    pub fn root() -> Self {
        Node {
            label: Label::root(),
            parent: None,
            children: BTreeMap::new(),
        }
    }

    pub fn new(label: Label, parent: NodeId) -> Self {
        Node {
            label,
            parent: Some(parent),
            children: BTreeMap::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, byte: u8) -> Option<NodeId> {
        self.children.get(&byte).copied()
    }

    /// Returns the child if there is exactly one.
    pub fn only_child(&self) -> Option<NodeId> {
        if self.children.len() == 1 {
            self.children.values().next().copied()
        } else {
            None
        }
    }

    /// Byte this node is indexed under in its parent.
    ///
    /// # Panics
    ///
    /// Panics on the root, whose label is empty.
    pub fn first_byte(&self) -> u8 {
        match self.label.first_byte() {
            Some(byte) => byte,
            None => panic!("only the root has an empty label"),
        }
    }
}

/// A read-only handle to one node of a [`CompressedTrie`](crate::CompressedTrie).
///
/// `NodeRef` borrows the trie immutably, so the structure cannot change while
/// a handle is alive.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    nodes: &'a SlotMap<NodeId, Node>,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(nodes: &'a SlotMap<NodeId, Node>, id: NodeId) -> Self {
        debug_assert!(nodes.contains_key(id));
        NodeRef { nodes, id }
    }

    fn node(&self) -> &'a Node {
        &self.nodes[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The bytes on the edge leading into this node. Leaf labels end with
    /// [`SENTINEL`]. Empty for the root.
    pub fn label(&self) -> &'a [u8] {
        self.node().label.as_bytes()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let nodes = self.nodes;
        self.node().parent.map(|id| NodeRef::new(nodes, id))
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// The child whose label starts with `byte`, if any.
    pub fn child(&self, byte: u8) -> Option<NodeRef<'a>> {
        let nodes = self.nodes;
        self.node().child(byte).map(|id| NodeRef::new(nodes, id))
    }

    /// Children in ascending order of their first label byte.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let nodes = self.nodes;
        self.node()
            .children
            .values()
            .map(move |&id| NodeRef::new(nodes, id))
    }

    /// The stored key ending at this node, without the sentinel.
    ///
    /// Only leaves terminate keys; internal nodes and the root return `None`.
    pub fn key(&self) -> Option<&'a [u8]> {
        let node = self.node();
        if node.parent.is_none() || !node.is_leaf() {
            return None;
        }
        let path = node.label.path_bytes();
        debug_assert_eq!(path.last(), Some(&SENTINEL));
        Some(&path[..path.len() - 1])
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", &String::from_utf8_lossy(self.label()))
            .field("children", &self.child_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn build() -> (SlotMap<NodeId, Node>, NodeId, NodeId, NodeId) {
        let source: Arc<[u8]> = Arc::from(&b"help\0"[..]);
        let other: Arc<[u8]> = Arc::from(&b"hello\0"[..]);

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::root());

        let branch = nodes.insert(Node::new(Label::new(Arc::clone(&source), 0, 3), root));
        let leaf = nodes.insert(Node::new(Label::new(source, 3, 2), branch));
        let other_leaf = nodes.insert(Node::new(Label::new(other, 3, 3), branch));

        for (parent, child) in [(root, branch), (branch, leaf), (branch, other_leaf)] {
            let byte = nodes[child].first_byte();
            nodes[parent].children.insert(byte, child);
        }

        (nodes, root, branch, leaf)
    }

    #[test]
    fn test_new_node() {
        let node = Node::root();
        assert!(node.is_leaf());
        assert!(node.parent.is_none());
        assert_eq!(node.only_child(), None);
    }

    #[test]
    #[should_panic]
    fn test_root_has_no_first_byte() {
        Node::root().first_byte();
    }

    #[test]
    fn test_only_child() {
        let (nodes, root, branch, _) = build();
        assert_eq!(nodes[root].only_child(), Some(branch));
        assert_eq!(nodes[branch].only_child(), None);
    }

    #[test]
    fn test_node_ref_navigation() {
        let (nodes, root, branch, leaf) = build();
        let root_ref = NodeRef::new(&nodes, root);

        assert!(root_ref.is_root());
        assert!(root_ref.label().is_empty());
        assert_eq!(root_ref.key(), None);

        let branch_ref = root_ref.child(b'h').unwrap();
        assert_eq!(branch_ref.id(), branch);
        assert_eq!(branch_ref.label(), b"hel");
        assert_eq!(branch_ref.key(), None);

        let labels: Vec<&[u8]> = branch_ref.children().map(|c| c.label()).collect();
        assert_eq!(labels, vec![&b"lo\0"[..], &b"p\0"[..]]);

        let leaf_ref = NodeRef::new(&nodes, leaf);
        assert!(leaf_ref.is_leaf());
        assert_eq!(leaf_ref.key(), Some(&b"help"[..]));
        assert_eq!(leaf_ref.parent().unwrap().id(), branch);
    }
}
