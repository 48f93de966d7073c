//! Reading a header back and decoding the bit-stream against it.
//!
//! The header codes are loaded into a binary trie. Decoding walks the trie one bit at a time
//! and emits a word each time it lands on a terminal node. Because the codes are prefix-free,
//! that greedy match is the only possible one.

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};

use log::debug;

use crate::error::{Error, Result};
use crate::huffman::CodeList;

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: [Option<usize>; 2],
    entry: Option<usize>,
}

impl TrieNode {
    fn is_branch(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// Prefix-free word code table rebuilt from a header.
#[derive(Debug, Clone)]
pub struct CodeBook {
    entries: CodeList,
    trie: Vec<TrieNode>,
}

impl Default for CodeBook {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBook {
    /// Empty code book. It decodes only the empty stream.
    pub fn new() -> Self {
        Self {
            entries: CodeList::new(),
            trie: vec![TrieNode::default()],
        }
    }

    /// Read `word code` lines. Blank lines are skipped.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut book = Self::new();
        let mut seen = HashSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(Error::ReadFailure)?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let malformed = || Error::MalformedHeader {
                line: index + 1,
                content: line.to_owned(),
            };
            let (word, code) = line.split_once(' ').ok_or_else(malformed)?;
            if word.is_empty() || code.is_empty() || !code.bytes().all(|b| b == b'0' || b == b'1')
            {
                return Err(malformed());
            }
            if !seen.insert(word.to_owned()) {
                return Err(Error::AmbiguousCode {
                    word: word.to_owned(),
                });
            }

            book.insert(word, code)?;
        }

        debug!("Loaded code book with {} entries", book.entries.len());
        Ok(book)
    }

    fn insert(&mut self, word: &str, code: &str) -> Result<()> {
        let ambiguous = || Error::AmbiguousCode {
            word: word.to_owned(),
        };

        let mut node = 0;
        for bit in code.bytes() {
            // An existing code ends here, so it is a prefix of this one.
            if self.trie[node].entry.is_some() {
                return Err(ambiguous());
            }
            let slot = usize::from(bit == b'1');
            node = match self.trie[node].children[slot] {
                Some(child) => child,
                None => {
                    self.trie.push(TrieNode::default());
                    let child = self.trie.len() - 1;
                    self.trie[node].children[slot] = Some(child);
                    child
                }
            };
        }

        if self.trie[node].entry.is_some() || self.trie[node].is_branch() {
            return Err(ambiguous());
        }
        self.trie[node].entry = Some(self.entries.len());
        self.entries.push((word.to_owned(), code.to_owned()));
        Ok(())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the header had no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(word, code)` pairs in header order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Code recorded for `word`.
    pub fn code_of(&self, word: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, code)| code.as_str())
    }

    /// Turn a wrapped '0'/'1' stream back into words. Line breaks are ignored.
    pub fn decode<R: Read>(&self, reader: R) -> Result<Vec<String>> {
        let mut words = Vec::new();
        let mut node = 0;
        let mut pending = 0;

        for (position, byte) in BufReader::new(reader).bytes().enumerate() {
            let slot = match byte.map_err(Error::ReadFailure)? {
                b'0' => 0,
                b'1' => 1,
                b'\n' | b'\r' => continue,
                other => {
                    return Err(Error::InvalidBit {
                        position,
                        found: char::from(other),
                    });
                }
            };

            node = self.trie[node].children[slot].ok_or(Error::UnknownCode { position })?;
            pending += 1;

            if let Some(entry) = self.trie[node].entry {
                words.push(self.entries[entry].0.clone());
                node = 0;
                pending = 0;
            }
        }

        if pending > 0 {
            return Err(Error::TruncatedStream { pending });
        }
        debug!("Decoded {} words", words.len());
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(header: &str) -> Result<CodeBook> {
        CodeBook::parse(header.as_bytes())
    }

    #[test]
    fn parses_and_decodes() {
        let book = book("cat 00\ndog 01\nthe 1\n").unwrap();
        assert_eq!(book.len(), 3);
        assert_eq!(
            book.entries(),
            [
                ("cat".to_string(), "00".to_string()),
                ("dog".to_string(), "01".to_string()),
                ("the".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(book.code_of("dog"), Some("01"));
        assert_eq!(book.code_of("bird"), None);
        assert_eq!(
            book.decode("100\n1011\n".as_bytes()).unwrap(),
            ["the", "cat", "the", "dog", "the"]
        );
    }

    #[test]
    fn single_word_book() {
        let book = book("solo 0\n").unwrap();
        assert_eq!(book.decode("000\n".as_bytes()).unwrap(), ["solo"; 3]);
        assert!(matches!(
            book.decode("01".as_bytes()),
            Err(Error::UnknownCode { position: 1 })
        ));
    }

    #[test]
    fn empty_header_decodes_empty_stream() {
        let book = book("").unwrap();
        assert!(book.is_empty());
        assert!(book.decode("".as_bytes()).unwrap().is_empty());
        assert!(book.decode("\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            book("cat 00\ndog\n"),
            Err(Error::MalformedHeader { line: 2, .. })
        ));
        assert!(matches!(
            book("cat 0x\n"),
            Err(Error::MalformedHeader { line: 1, .. })
        ));
        assert!(matches!(
            book(" 01\n"),
            Err(Error::MalformedHeader { .. })
        ));
        assert!(matches!(
            book("cat \n"),
            Err(Error::MalformedHeader { .. })
        ));
        assert!(matches!(
            book("two words 01\n"),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn rejects_ambiguous_codes() {
        for header in [
            "cat 0\ndog 01\n",
            "cat 01\ndog 0\n",
            "cat 01\ndog 01\n",
            "cat 0\ncat 1\n",
        ] {
            assert!(
                matches!(book(header), Err(Error::AmbiguousCode { .. })),
                "{header:?}"
            );
        }
    }

    #[test]
    fn stream_errors() {
        let book = book("cat 00\ndog 01\nthe 1\n").unwrap();
        assert!(matches!(
            book.decode("10x".as_bytes()),
            Err(Error::InvalidBit { position: 2, found: 'x' })
        ));
        assert!(matches!(
            book.decode("1\n0".as_bytes()),
            Err(Error::TruncatedStream { pending: 1 })
        ));
    }

    #[test]
    fn tolerates_crlf() {
        let book = book("cat 00\r\ndog 01\r\nthe 1\r\n").unwrap();
        assert_eq!(book.decode("0001\r\n".as_bytes()).unwrap(), ["cat", "dog"]);
    }
}
