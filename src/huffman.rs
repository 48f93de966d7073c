//! Huffman tree construction, code assignment and bit-stream emission over words.

use std::collections::HashMap;
use std::io::Write;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::priority::{PriorityOrdering, Ranked};

/// word -> code lookup.
pub type CodeTable = HashMap<String, String>;
/// `(word, code)` pairs in left-to-right leaf order.
pub type CodeList = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Leaf {
        word: String,
        count: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    fn weight(&self) -> u64 {
        match self {
            Node::Leaf { count, .. } => *count,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Word-level Huffman coder.
///
/// Owns the whole merge tree as an arena. Children are addressed by index, and every node
/// is dropped together with the coder.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl HuffmanCoder {
    /// Build the merge tree for `counts`.
    ///
    /// The two lowest-ranked nodes are merged repeatedly (see [`PriorityOrdering`] for the
    /// ranking). The first one extracted becomes the left child. A single word becomes the
    /// root on its own, and an empty list gives an empty coder.
    ///
    /// A word listed more than once gets one leaf carrying the sum of its counts. Weights
    /// saturate at `u64::MAX` instead of overflowing.
    pub fn from_counts(counts: &[(String, u64)]) -> Self {
        let counts = merge_duplicates(counts);
        debug!("Building Huffman tree from {} unique words", counts.len());

        let mut coder = Self {
            nodes: Vec::with_capacity(counts.len().saturating_mul(2)),
            root: None,
        };

        let leaves: Vec<Ranked<NodeId>> = counts
            .into_iter()
            .map(|(word, count)| {
                let id = coder.push(Node::Leaf {
                    word: word.to_owned(),
                    count,
                });
                Ranked::new(count, word, id)
            })
            .collect();

        let mut pq = PriorityOrdering::from_vec(leaves);
        coder.root = loop {
            let Some(a) = pq.extract_min() else {
                break None;
            };
            let Some(b) = pq.extract_min() else {
                break Some(a.handle);
            };

            let weight = a.weight.saturating_add(b.weight);
            let id = coder.push(Node::Internal {
                weight,
                left: a.handle,
                right: b.handle,
            });
            trace!(
                "Merged '{}' ({}) + '{}' ({}) -> weight {}",
                a.word, a.weight, b.word, b.weight, weight
            );
            pq.insert(Ranked::new(weight, a.word.min(b.word), id));
        };

        debug!("Tree construction complete: {} nodes", coder.nodes.len());
        coder
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Whether the coder was built from an empty list.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct words (leaves).
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Weight of the root, i.e. the total number of tokens counted. 0 when empty.
    pub fn total_weight(&self) -> u64 {
        self.root.map_or(0, |root| self.node(root).weight())
    }

    /// Edges on the longest root-to-leaf path. 0 for an empty tree or a lone leaf.
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => height = height.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        height
    }

    /// Code for every word, in left-to-right leaf order.
    ///
    /// Descending left appends '0' and descending right appends '1'. A tree that is a single
    /// leaf gives that word the code "0".
    pub fn assign_codes(&self) -> CodeList {
        let mut out = CodeList::with_capacity(self.nodes.len() / 2 + 1);
        let Some(root) = self.root else {
            return out;
        };

        // Right is pushed before left so leaves pop in left-to-right order.
        let mut stack = vec![(root, String::new())];
        while let Some((id, prefix)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { word, .. } => {
                    let code = if prefix.is_empty() {
                        "0".to_string()
                    } else {
                        prefix
                    };
                    trace!("Assigning code to '{}': '{}'", word, code);
                    out.push((word.clone(), code));
                }
                Node::Internal { left, right, .. } => {
                    stack.push((*right, format!("{}1", prefix)));
                    stack.push((*left, prefix + "0"));
                }
            }
        }
        out
    }

    /// [`assign_codes`](Self::assign_codes) as a lookup table.
    pub fn code_table(&self) -> CodeTable {
        self.assign_codes().into_iter().collect()
    }

    /// Write one `word code` line per leaf, in the same order as
    /// [`assign_codes`](Self::assign_codes). An empty tree writes nothing.
    pub fn write_header<W: Write>(&self, sink: &mut W) -> Result<()> {
        let codes = self.assign_codes();
        debug!("Writing header with {} entries", codes.len());

        for (word, code) in &codes {
            writeln!(sink, "{} {}", word, code)?;
        }
        sink.flush()?;
        Ok(())
    }

    /// Encode `tokens` as '0'/'1' text, with a newline after every `wrap_column` bits.
    ///
    /// A non-empty last line also gets a newline. A `wrap_column` of 0 turns wrapping off.
    /// Returns the number of bits written. An empty token list writes nothing.
    ///
    /// Stops at the first token with no code ([`Error::UnknownToken`]). Bits already written
    /// for earlier tokens stay in the sink.
    pub fn encode<I, W>(&self, tokens: I, sink: &mut W, wrap_column: usize) -> Result<u64>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        W: Write,
    {
        let codes = self.code_table();
        let wrap = if wrap_column == 0 {
            usize::MAX
        } else {
            wrap_column
        };

        let mut column = 0usize;
        let mut bits = 0u64;
        for token in tokens {
            let token = token.as_ref();
            let code = codes
                .get(token)
                .ok_or_else(|| Error::UnknownToken(token.to_owned()))?;

            let mut rest = code.as_bytes();
            while !rest.is_empty() {
                let take = rest.len().min(wrap - column);
                sink.write_all(&rest[..take])?;
                column += take;
                rest = &rest[take..];

                if column == wrap {
                    sink.write_all(b"\n")?;
                    column = 0;
                }
            }
            bits += code.len() as u64;
        }

        if column > 0 {
            sink.write_all(b"\n")?;
        }
        sink.flush()?;

        debug!("Encoded {} bits", bits);
        Ok(bits)
    }
}

/// Fold repeated words into their first occurrence, keeping input order.
fn merge_duplicates(counts: &[(String, u64)]) -> Vec<(&str, u64)> {
    let mut merged: Vec<(&str, u64)> = Vec::with_capacity(counts.len());
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(counts.len());

    for (word, count) in counts {
        match slots.get(word.as_str()) {
            Some(&slot) => {
                debug!("Word '{}' listed more than once, merging counts", word);
                merged[slot].1 = merged[slot].1.saturating_add(*count);
            }
            None => {
                slots.insert(word.as_str(), merged.len());
                merged.push((word.as_str(), *count));
            }
        }
    }
    merged
}
