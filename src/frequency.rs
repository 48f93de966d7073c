//! Word frequency counting.
//!
//! [`FrequencyTable`] is an unbalanced binary search tree keyed by word. Inserting a word
//! that is already present bumps its count instead of adding a node, so the tree holds one
//! node per distinct word. Nothing rebalances it: sorted input degrades it to a list, which
//! is why the encode pipeline shuffles tokens before counting.
//!
//! Every walk over the tree uses an explicit stack, so a degenerate tree costs time but never
//! call-stack depth.

use std::cmp::Ordering;
use std::io::Write;

use log::{debug, trace};

use crate::error::Result;

/// `(word, count)` pairs in ascending word order, as produced by
/// [`FrequencyTable::collect_sorted`].
pub type WordCounts = Vec<(String, u64)>;

#[derive(Debug)]
struct TableNode {
    word: String,
    count: u64,
    left: Option<Box<TableNode>>,
    right: Option<Box<TableNode>>,
}

impl TableNode {
    fn new(word: &str) -> Self {
        Self {
            word: word.to_owned(),
            count: 1,
            left: None,
            right: None,
        }
    }
}

/// Ordered word -> occurrence count mapping.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    root: Option<Box<TableNode>>,
    len: usize,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn insert(&mut self, word: &str) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match word.cmp(node.word.as_str()) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    node.count += 1;
                    return;
                }
            }
        }

        trace!("New word in frequency table: '{}'", word);
        *slot = Some(Box::new(TableNode::new(word)));
        self.len += 1;
    }

    /// Insert every word in sequence. The order only affects the shape of the tree.
    pub fn bulk_insert<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    fn find(&self, word: &str) -> Option<&TableNode> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match word.cmp(node.word.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Whether `word` has been inserted at least once.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some()
    }

    /// Occurrence count of `word`, or `None` if it was never inserted.
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.find(word).map(|node| node.count)
    }

    /// In-order walk over `(word, count)` pairs.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Every `(word, count)` pair in ascending word order.
    pub fn collect_sorted(&self) -> WordCounts {
        let counts: WordCounts = self
            .iter()
            .map(|(word, count)| (word.to_owned(), count))
            .collect();
        debug!("Collected {} distinct words from frequency table", counts.len());
        counts
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Edges on the longest root-to-leaf path. 0 for both an empty table and a single word.
    pub fn height(&self) -> usize {
        let Some(root) = self.root.as_deref() else {
            return 0;
        };

        let mut height = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Smallest count in the table, 0 when empty.
    pub fn min_frequency(&self) -> u64 {
        self.iter().map(|(_, count)| count).min().unwrap_or(0)
    }

    /// Largest count in the table, 0 when empty.
    pub fn max_frequency(&self) -> u64 {
        self.iter().map(|(_, count)| count).max().unwrap_or(0)
    }
}

impl Drop for FrequencyTable {
    fn drop(&mut self) {
        // Unlink children before each node drops so teardown never recurses.
        let mut stack: Vec<Box<TableNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        table.bulk_insert(iter);
        table
    }
}

impl<S: AsRef<str>> Extend<S> for FrequencyTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.bulk_insert(iter);
    }
}

/// In-order iterator over a [`FrequencyTable`].
pub struct Iter<'a> {
    stack: Vec<&'a TableNode>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a TableNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((node.word.as_str(), node.count))
    }
}

/// Write `counts` as a frequency report.
///
/// One line per word, count descending and word ascending on ties. Each line is the count
/// right-aligned in ten columns, a space, then the word.
pub fn write_frequency_report<W: Write>(counts: &[(String, u64)], sink: &mut W) -> Result<()> {
    let mut sorted: Vec<&(String, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    for (word, count) in sorted {
        writeln!(sink, "{:>10} {}", count, word)?;
    }
    sink.flush()?;
    Ok(())
}
