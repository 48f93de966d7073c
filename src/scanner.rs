//! Splitting raw text into word tokens.
//!
//! A word is a run of ASCII letters, lowercased. An apostrophe joins two letters (`don't`),
//! but one that is not followed by a letter ends the word (`dogs'` gives `dogs`). Every other
//! character separates words.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Split `text` into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_alphabetic() {
            word.push(c.to_ascii_lowercase());
        } else if c == '\'' && !word.is_empty() && chars.peek().is_some_and(char::is_ascii_alphabetic)
        {
            word.push(c);
        } else if !word.is_empty() {
            words.push(std::mem::take(&mut word));
        }
    }
    if !word.is_empty() {
        words.push(word);
    }

    words
}

/// Tokenizer bound to one input file.
#[derive(Debug, Clone)]
pub struct Scanner {
    input: PathBuf,
}

impl Scanner {
    /// Scanner over the file at `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// File this scanner reads.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Read the whole file and split it into tokens.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Only ASCII letters form words anyway.
    pub fn tokenize(&self) -> Result<Vec<String>> {
        let bytes = fs::read(&self.input).map_err(|source| Error::SourceUnavailable {
            path: self.input.clone(),
            source,
        })?;

        let words = tokenize(&String::from_utf8_lossy(&bytes));
        debug!("Scanned {} tokens from {}", words.len(), self.input.display());
        Ok(words)
    }
}

/// Write tokens one per line.
pub fn write_tokens<W: Write, S: AsRef<str>>(tokens: &[S], sink: &mut W) -> Result<()> {
    for token in tokens {
        writeln!(sink, "{}", token.as_ref())?;
    }
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_letters() {
        assert_eq!(
            tokenize("The cat, the DOG; 42 the-end."),
            ["the", "cat", "the", "dog", "the", "end"]
        );
    }

    #[test]
    fn apostrophes_inside_words_only() {
        assert_eq!(
            tokenize("Don't 'quote' the dogs' bones o'clock"),
            ["don't", "quote", "the", "dogs", "bones", "o'clock"]
        );
        assert_eq!(tokenize("rock''n"), ["rock", "n"]);
    }

    #[test]
    fn empty_and_letterless_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  123 !? \n").is_empty());
    }

    #[test]
    fn non_ascii_letters_separate() {
        assert_eq!(tokenize("café naïve"), ["caf", "na", "ve"]);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let scanner = Scanner::new("/definitely/not/here.txt");
        assert_eq!(scanner.input(), Path::new("/definitely/not/here.txt"));
        assert!(matches!(
            scanner.tokenize(),
            Err(Error::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn tokens_one_per_line() {
        let mut out = Vec::new();
        write_tokens(&["a", "b"], &mut out).unwrap();
        assert_eq!(out, b"a\nb\n");
    }
}
