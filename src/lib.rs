//! # word_huffman
//!
//! Huffman coding over whole words instead of bytes.
//!
//! The pipeline runs leaves first:
//!
//! ```text
//! tokens -> FrequencyTable -> sorted (word, count) list -> HuffmanCoder -> header + bit-stream
//!                                                              |
//!                                                      PriorityOrdering
//! ```
//!
//! The header lists one `word code` pair per line. The bit-stream is text made of '0' and
//! '1', wrapped at a fixed column. [`CodeBook`] reads both back into the original tokens.
//!
//! ```
//! use word_huffman::{CodeBook, FrequencyTable, HuffmanCoder};
//!
//! let tokens = ["the", "cat", "the", "dog", "the"];
//! let table: FrequencyTable = tokens.iter().collect();
//! let coder = HuffmanCoder::from_counts(&table.collect_sorted());
//!
//! let mut header = Vec::new();
//! let mut bits = Vec::new();
//! coder.write_header(&mut header)?;
//! coder.encode(&tokens, &mut bits, 80)?;
//!
//! let book = CodeBook::parse(header.as_slice())?;
//! assert_eq!(book.decode(bits.as_slice())?, tokens);
//! # Ok::<(), word_huffman::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codebook;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod pipeline;
pub mod priority;
pub mod scanner;

pub use codebook::CodeBook;
pub use error::{Error, Result};
pub use frequency::{FrequencyTable, WordCounts};
pub use huffman::{CodeList, CodeTable, HuffmanCoder};
pub use pipeline::{EncodeConfig, EncodeReport};
pub use priority::{PriorityOrdering, Ranked};
pub use scanner::{Scanner, tokenize};
