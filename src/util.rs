/// Finds the length of the common prefix between a key and a node's label.
///
/// Returns the number of bytes that match starting from the given offset.
pub fn prefix_match(key: &[u8], start_idx: usize, label: &[u8]) -> usize {
    let tail = key.get(start_idx..).unwrap_or(&[]);
    tail.iter()
        .zip(label.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Returns `true` if the key, read from `start_idx`, begins with all of `label`.
pub fn matches_label(key: &[u8], start_idx: usize, label: &[u8]) -> bool {
    key.get(start_idx..)
        .map_or(false, |tail| tail.starts_with(label))
}
