//! Examples of using the Patricia set
use patricia_set::{CompressedTrie, PlainTrie};
use std::collections::HashSet;

fn main() {
    // Create a new trie and insert some words
    let mut trie = CompressedTrie::new();
    for word in ["romane", "romanus", "romulus", "rubens", "ruber", "rubicon"] {
        trie.insert(word).unwrap();
    }

    // Exact membership
    assert!(trie.search("romulus"));
    assert!(!trie.search("rom"));

    // Keys containing the sentinel byte are rejected
    assert!(trie.insert("bad\0key").is_err());

    // Prefix search returns every key starting with the prefix
    let hits: HashSet<String> = trie.range_search("rub");
    println!("keys starting with \"rub\": {:?}", hits);

    // Keys come back in byte order when iterated
    let all: Vec<String> = trie.keys();
    println!("all keys: {:?}", all);

    // Removal merges single-child nodes back into their child
    println!("nodes before removal: {}", trie.node_count());
    trie.remove("romulus");
    trie.remove("romanus");
    println!("nodes after removal:  {}", trie.node_count());

    // The uncompressed baseline answers the same queries with more nodes
    let mut plain = PlainTrie::new();
    for word in &all {
        plain.insert(word).unwrap();
    }
    let plain_hits: HashSet<String> = plain.range_search("rub");
    assert_eq!(plain_hits, hits);

    let mut full = CompressedTrie::new();
    full.extend(&all);
    println!(
        "plain trie nodes: {}, compressed trie nodes: {}",
        plain.node_count(),
        full.node_count()
    );
}

#[test]
fn test_prefix_view() {
    let mut trie = CompressedTrie::new();
    trie.insert("hello").unwrap();
    trie.insert("help").unwrap();
    trie.insert("world").unwrap();

    // Create a view of the "hel" prefix
    let view = trie.view_subtrie("hel");

    // Check prefix view properties
    assert!(view.exists());
    assert_eq!(view.len(), 2);
    assert!(!view.is_empty());

    // Check key existence in the view
    assert!(view.contains_key("hello"));
    assert!(view.contains_key("help"));
    assert!(!view.contains_key("world"));
}
