//! Priority ordering used while merging the Huffman tree.
//!
//! Entries are ranked by weight ascending, then by representative word ascending. The lowest
//! weight extracts first, and on equal weight the smaller word wins. Two entries only tie when
//! both weight and word are equal, so the merge sequence is reproducible.
//!
//! The ordering only carries handles (`H`, a node index for the coder). It never owns the
//! nodes those handles name.

use std::cmp::Ordering;

/// A handle together with the key it is ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<H> {
    /// Occurrence count for a leaf, sum of children for a merged node.
    pub weight: u64,
    /// Tie-break word: the leaf word, or the smaller of the children's words.
    pub word: String,
    /// Caller-owned reference to the ranked item.
    pub handle: H,
}

impl<H> Ranked<H> {
    /// Bundle a handle with its ranking key.
    pub fn new(weight: u64, word: impl Into<String>, handle: H) -> Self {
        Self {
            weight,
            word: word.into(),
            handle,
        }
    }

    /// `Less` means `self` extracts before `other`.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Sorted collection that yields its lowest-ranked entries first.
///
/// Stored in reverse extraction order so the next entry out is always at the back.
#[derive(Debug, Clone)]
pub struct PriorityOrdering<H> {
    items: Vec<Ranked<H>>,
}

impl<H> PriorityOrdering<H> {
    /// Empty ordering.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Establish the order over `items` in one sort.
    pub fn from_vec(mut items: Vec<Ranked<H>>) -> Self {
        items.sort_by(|a, b| b.priority_cmp(a));
        Self { items }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there is nothing left to extract.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Next entry to be extracted, without removing it.
    pub fn peek_min(&self) -> Option<&Ranked<H>> {
        self.items.last()
    }

    /// Remove and return the lowest-ranked entry.
    pub fn extract_min(&mut self) -> Option<Ranked<H>> {
        self.items.pop()
    }

    /// Insert keeping the order. Entries that rank equal to `item` stay ahead of it.
    pub fn insert(&mut self, item: Ranked<H>) {
        let at = self
            .items
            .partition_point(|probe| probe.priority_cmp(&item) == Ordering::Greater);
        self.items.insert(at, item);
    }

    /// Check the ordering invariant over the current contents.
    pub fn is_sorted(&self) -> bool {
        self.items
            .windows(2)
            .all(|pair| pair[0].priority_cmp(&pair[1]) != Ordering::Less)
    }
}

impl<H> Default for PriorityOrdering<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FromIterator<Ranked<H>> for PriorityOrdering<H> {
    fn from_iter<I: IntoIterator<Item = Ranked<H>>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(mut ordering: PriorityOrdering<usize>) -> Vec<String> {
        std::iter::from_fn(|| ordering.extract_min())
            .map(|r| r.word)
            .collect()
    }

    #[test]
    fn empty_ordering() {
        let mut pq: PriorityOrdering<usize> = PriorityOrdering::new();
        assert!(pq.is_empty());
        assert_eq!(pq.peek_min(), None);
        assert_eq!(pq.extract_min(), None);
        assert!(pq.is_sorted());
    }

    #[test]
    fn lower_weight_first_then_smaller_word() {
        let pq = PriorityOrdering::from_vec(vec![
            Ranked::new(3, "the", 0),
            Ranked::new(1, "dog", 1),
            Ranked::new(1, "cat", 2),
            Ranked::new(2, "ant", 3),
        ]);
        assert!(pq.is_sorted());
        assert_eq!(pq.peek_min().map(|r| r.handle), Some(2));
        assert_eq!(words(pq), ["cat", "dog", "ant", "the"]);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut pq: PriorityOrdering<usize> =
            [Ranked::new(5, "a", 0), Ranked::new(2, "b", 1)].into_iter().collect();
        assert_eq!(pq.peek_min().map(|r| r.weight), Some(2));
        assert_eq!(pq.len(), 2);
        assert_eq!(pq.extract_min().map(|r| r.handle), Some(1));
        assert_eq!(pq.len(), 1);
    }

    #[test]
    fn insert_keeps_order() {
        let mut pq = PriorityOrdering::from_vec(vec![
            Ranked::new(1, "cat", 0),
            Ranked::new(4, "the", 1),
        ]);
        pq.insert(Ranked::new(2, "ant", 2));
        pq.insert(Ranked::new(4, "sea", 3));
        pq.insert(Ranked::new(0, "zoo", 4));
        assert!(pq.is_sorted());
        assert_eq!(words(pq), ["zoo", "cat", "ant", "sea", "the"]);
    }

    #[test]
    fn equal_keys_keep_earlier_entry_first() {
        let mut pq = PriorityOrdering::new();
        pq.insert(Ranked::new(1, "a", "first"));
        pq.insert(Ranked::new(1, "a", "second"));
        assert_eq!(pq.extract_min().map(|r| r.handle), Some("first"));
        assert_eq!(pq.extract_min().map(|r| r.handle), Some("second"));
    }
}
