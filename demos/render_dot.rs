//! Renders a compressed trie as a Graphviz graph
//!
//! `cargo run --example render_dot -- romane romanus romulus | dot -Tsvg`
use patricia_set::{CompressedTrie, NodeRef, SENTINEL};
use std::fmt::Write;
use tracing_subscriber::EnvFilter;

// The sentinel is shown as `¤`.
fn escape(label: &[u8]) -> String {
    String::from_utf8_lossy(label)
        .replace(char::from(SENTINEL), "¤")
        .replace('"', "\\\"")
}

fn render(trie: &CompressedTrie) -> Result<String, std::fmt::Error> {
    let mut dot = String::new();
    writeln!(dot, "digraph trie {{")?;
    writeln!(dot, "    node [shape=circle, label=\"\"];")?;

    // Nodes are numbered in the order they are reached.
    let mut next_id = 1usize;
    let mut stack: Vec<(NodeRef<'_>, usize)> = vec![(trie.root(), 0)];
    while let Some((node, id)) = stack.pop() {
        if node.is_leaf() && !node.is_root() {
            writeln!(dot, "    n{} [shape=doublecircle];", id)?;
        }
        for child in node.children() {
            writeln!(
                dot,
                "    n{} -> n{} [label=\"{}\"];",
                id,
                next_id,
                escape(child.label())
            )?;
            stack.push((child, next_id));
            next_id += 1;
        }
    }

    writeln!(dot, "}}")?;
    Ok(dot)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut words: Vec<String> = std::env::args().skip(1).collect();
    if words.is_empty() {
        words = ["romane", "romanus", "romulus", "rubens", "ruber", "rubicon", "rubicundus"]
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    let mut trie = CompressedTrie::new();
    for word in &words {
        if let Err(err) = trie.insert(word) {
            tracing::warn!(%word, %err, "skipping key");
        }
    }

    print!("{}", render(&trie)?);
    Ok(())
}
