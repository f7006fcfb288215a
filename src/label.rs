//! Zero-copy edge labels.
//!
//! A [`Label`] is a `(buffer, start, len)` view into the sentineled bytes of
//! one inserted key. Splitting an edge or splicing a node out of the tree only
//! moves offsets around; the bytes themselves are never copied.
//!
//! Every label built by the trie also satisfies `buffer[..start] == path`,
//! where `path` is the concatenation of the labels from the root down to (but
//! not including) the node holding the label. Splicing relies on this to grow
//! a label backward.

use std::fmt;
use std::sync::Arc;

/// A view over a shared, immutable byte buffer.
#[derive(Clone)]
pub(crate) struct Label {
    source: Arc<[u8]>,
    start: usize,
    len: usize,
}

impl Label {
    /// Creates a label viewing `source[start..start + len]`.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty or does not fit inside `source`. Labels
    /// are only ever built by the trie itself, so this is an invariant check.
    pub fn new(source: Arc<[u8]>, start: usize, len: usize) -> Self {
        assert!(len > 0, "edge label must not be empty");
        assert!(
            start
                .checked_add(len)
                .map_or(false, |end| end <= source.len()),
            "edge label {}..{} out of bounds for buffer of {} bytes",
            start,
            start.saturating_add(len),
            source.len()
        );
        Label { source, start, len }
    }

    /// The empty label carried by the root node.
    pub fn root() -> Self {
        Label {
            source: Arc::from(&[][..]),
            start: 0,
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.source[self.start..self.start + self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn source(&self) -> &Arc<[u8]> {
        &self.source
    }

    /// Byte under which this label is indexed in its parent's children.
    pub fn first_byte(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    /// The full byte path from the root through the end of this label.
    pub fn path_bytes(&self) -> &[u8] {
        &self.source[..self.start + self.len]
    }

    /// Cuts the first `k` bytes off this label and returns them as a new label
    /// over the same buffer.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < k < self.len()`.
    pub fn split_front(&mut self, k: usize) -> Label {
        assert!(
            k > 0 && k < self.len,
            "split point {} outside label of length {}",
            k,
            self.len
        );
        let front = Label::new(Arc::clone(&self.source), self.start, k);
        self.start += k;
        self.len -= k;
        front
    }

    /// Grows this label backward by `by` bytes so it also covers the label of
    /// a spliced-out parent.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `by` bytes precede the label in its buffer.
    pub fn extend_back(&mut self, by: usize) {
        assert!(
            by <= self.start,
            "cannot extend label at offset {} back by {}",
            self.start,
            by
        );
        self.start -= by;
        self.len += by;
    }

    /// Points this label at another buffer that holds identical bytes at the
    /// same offsets.
    pub fn rebase(&mut self, source: Arc<[u8]>) {
        debug_assert!(source.len() >= self.start + self.len);
        debug_assert_eq!(
            &source[..self.start + self.len],
            self.path_bytes(),
            "rebased buffer must agree on the path"
        );
        self.source = source;
    }

    pub fn shares_source(&self, other: &Arc<[u8]>) -> bool {
        Arc::ptr_eq(&self.source, other)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Label({:?} @ {}+{})",
            String::from_utf8_lossy(self.as_bytes()),
            self.start,
            self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(s: &str) -> Arc<[u8]> {
        Arc::from(s.as_bytes())
    }

    #[test]
    fn test_view() {
        let label = Label::new(buffer("hello\0"), 2, 3);
        assert_eq!(label.as_bytes(), b"llo");
        assert_eq!(label.first_byte(), Some(b'l'));
        assert_eq!(label.path_bytes(), b"hello");
    }

    #[test]
    fn test_root_label() {
        let root = Label::root();
        assert_eq!(root.len(), 0);
        assert_eq!(root.first_byte(), None);
        assert!(root.as_bytes().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_empty_label_rejected() {
        Label::new(buffer("abc"), 1, 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_label_rejected() {
        Label::new(buffer("abc"), 2, 2);
    }

    #[test]
    fn test_split_front_shares_buffer() {
        let source = buffer("alphabet\0");
        let mut label = Label::new(Arc::clone(&source), 0, 9);
        let front = label.split_front(5);

        assert_eq!(front.as_bytes(), b"alpha");
        assert_eq!(label.as_bytes(), b"bet\0");
        assert!(front.shares_source(&source));
        assert!(label.shares_source(&source));
    }

    #[test]
    #[should_panic]
    fn test_split_at_full_length_rejected() {
        let mut label = Label::new(buffer("abc"), 0, 3);
        label.split_front(3);
    }

    #[test]
    fn test_extend_back_undoes_split() {
        let mut label = Label::new(buffer("prefix\0"), 0, 7);
        let front = label.split_front(4);
        label.extend_back(front.len());
        assert_eq!(label.as_bytes(), b"prefix\0");
        assert_eq!(label.start(), 0);
    }

    #[test]
    fn test_rebase_keeps_bytes() {
        let mut label = Label::new(buffer("help\0"), 0, 3);
        let other = buffer("hello\0");
        label.rebase(Arc::clone(&other));
        assert_eq!(label.as_bytes(), b"hel");
        assert!(label.shares_source(&other));
    }
}
