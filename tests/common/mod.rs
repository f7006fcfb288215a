#![allow(dead_code)]

use patricia_set::{CompressedTrie, NodeRef, SENTINEL};

/// Walks the whole trie through its read-only handles and checks the
/// structural invariants. Returns the keys found at the leaves.
pub fn check_structure(trie: &CompressedTrie) -> Vec<Vec<u8>> {
    let root = trie.root();
    assert!(root.is_root());
    assert!(root.label().is_empty());
    assert!(root.parent().is_none());

    let mut keys = Vec::new();
    let mut stack: Vec<(NodeRef<'_>, Vec<u8>)> = vec![(root, Vec::new())];
    while let Some((node, path)) = stack.pop() {
        let mut last_first_byte = None;
        for child in node.children() {
            let label = child.label();
            assert!(!label.is_empty(), "non-root node with empty label");

            // Sibling labels are ordered and never share a first byte.
            let first = label[0];
            if let Some(previous) = last_first_byte {
                assert!(previous < first, "siblings share or misorder first bytes");
            }
            last_first_byte = Some(first);

            assert_eq!(child.parent().map(|p| p.id()), Some(node.id()));

            let mut child_path = path.clone();
            child_path.extend_from_slice(label);
            stack.push((child, child_path));
        }

        if node.is_root() {
            continue;
        }

        if node.is_leaf() {
            assert_eq!(path.last(), Some(&SENTINEL), "leaf does not end a key");
            let key = &path[..path.len() - 1];
            assert!(!key.contains(&SENTINEL));
            assert_eq!(node.key(), Some(key));
            keys.push(key.to_vec());
        } else {
            assert!(
                node.child_count() >= 2,
                "internal node {:?} has a single child",
                node
            );
            assert!(!node.label().contains(&SENTINEL));
            assert_eq!(node.key(), None);
        }
    }

    assert_eq!(keys.len(), trie.len());
    keys.sort();
    keys
}
