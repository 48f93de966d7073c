//! Error types for the word coder.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error variants for counting, coding and decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// The output destination could not be opened for writing.
    #[error("unable to open {} for writing: {source}", path.display())]
    SinkUnavailable {
        /// Destination that was rejected.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },

    /// A write to an already-open sink failed part way through.
    #[error("failed to write output: {0}")]
    WriteFailure(#[from] io::Error),

    /// Reading an already-open source failed part way through.
    #[error("failed to read input: {0}")]
    ReadFailure(io::Error),

    /// A token has no entry in the code table.
    #[error("token '{0}' not found in codebook")]
    UnknownToken(String),

    /// The input could not be opened or read.
    #[error("unable to read {}: {source}", path.display())]
    SourceUnavailable {
        /// Source that was rejected.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },

    /// A header line is not of the form `word code`.
    #[error("malformed header line {line}: {content:?}")]
    MalformedHeader {
        /// 1-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },

    /// The header repeats a word or a code, or a code is a prefix of another.
    #[error("code for '{word}' is not prefix-free")]
    AmbiguousCode {
        /// Word whose code collided.
        word: String,
    },

    /// The bit-stream contains something other than '0', '1' or a line break.
    #[error("invalid character {found:?} at offset {position} in bit-stream")]
    InvalidBit {
        /// 0-based character offset.
        position: usize,
        /// The character found.
        found: char,
    },

    /// A run of bits in the stream starts no code in the header.
    #[error("bits ending at offset {position} match no code")]
    UnknownCode {
        /// 0-based character offset of the bit that left the code tree.
        position: usize,
    },

    /// The bit-stream ended in the middle of a code.
    #[error("bit-stream ends with {pending} unmatched bits")]
    TruncatedStream {
        /// Number of trailing bits that matched no code.
        pending: usize,
    },
}

/// A specialized Result type for word coder operations.
pub type Result<T> = std::result::Result<T, Error>;
