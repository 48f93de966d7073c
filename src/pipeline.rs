//! File-level encode and decode runs.
//!
//! Encoding a text file `<base>.txt` produces four files in the output directory:
//!
//! | file            | contents                                      |
//! |-----------------|-----------------------------------------------|
//! | `<base>.tokens` | the scanned tokens, one per line              |
//! | `<base>.freq`   | the frequency report                          |
//! | `<base>.hdr`    | the `word code` header                        |
//! | `<base>.code`   | the wrapped bit-stream of the tokens in order |

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::codebook::CodeBook;
use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, write_frequency_report};
use crate::huffman::HuffmanCoder;
use crate::scanner::{Scanner, write_tokens};

/// Directory the encoder writes into unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "input_output";
/// Bits per line of the `.code` file.
pub const DEFAULT_WRAP_COLUMN: usize = 80;
/// Seed for the pre-count shuffle.
pub const DEFAULT_SHUFFLE_SEED: u64 = 0xC0FFEE;

/// Settings for [`encode_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Existing directory that receives the output files.
    pub output_dir: PathBuf,
    /// Bits per line in the bit-stream. 0 disables wrapping.
    pub wrap_column: usize,
    /// Seed for shuffling tokens before counting. The same seed gives the same table shape.
    pub shuffle_seed: u64,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            wrap_column: DEFAULT_WRAP_COLUMN,
            shuffle_seed: DEFAULT_SHUFFLE_SEED,
        }
    }
}

/// Where one encode run writes its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputPaths {
    /// Token listing.
    pub tokens: PathBuf,
    /// Frequency report.
    pub freq: PathBuf,
    /// Code header.
    pub header: PathBuf,
    /// Encoded bit-stream.
    pub code: PathBuf,
}

impl OutputPaths {
    /// Paths for `input` placed in `dir`.
    pub fn new(input: &Path, dir: &Path) -> Self {
        let base = base_name(input);
        let at = |ext: &str| dir.join(format!("{}.{}", base, ext));
        Self {
            tokens: at("tokens"),
            freq: at("freq"),
            header: at("hdr"),
            code: at("code"),
        }
    }
}

/// File name of `input` without a trailing `.txt`.
pub fn base_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".txt") {
        Some(stem) => stem.to_owned(),
        None => name,
    }
}

/// Summary of an encode run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodeReport {
    /// Tokens scanned from the input.
    pub total_tokens: usize,
    /// Distinct words counted.
    pub distinct_words: usize,
    /// Frequency table height after the shuffled insert.
    pub table_height: usize,
    /// Smallest word count.
    pub min_frequency: u64,
    /// Largest word count.
    pub max_frequency: u64,
    /// Letters (and apostrophes) across all tokens.
    pub total_letters: usize,
    /// Bits in the encoded stream.
    pub total_bits: u64,
    /// Files written.
    pub paths: OutputPaths,
}

impl fmt::Display for EncodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total tokens: {}", self.total_tokens)?;
        writeln!(f, "Distinct words: {}", self.distinct_words)?;
        writeln!(f, "Table height: {}", self.table_height)?;
        writeln!(f, "Min frequency: {}", self.min_frequency)?;
        writeln!(f, "Max frequency: {}", self.max_frequency)?;
        writeln!(f, "Total letters in input words: {}", self.total_letters)?;
        write!(f, "Total bits in encoded words: {}", self.total_bits)
    }
}

/// Create (or truncate) `path` for buffered writing.
pub fn open_sink(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

fn open_source(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

fn check_input(input: &Path) -> Result<()> {
    let metadata = fs::metadata(input).map_err(|source| Error::SourceUnavailable {
        path: input.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(Error::SourceUnavailable {
            path: input.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

fn check_output_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::SinkUnavailable {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        }),
        Err(source) => Err(Error::SinkUnavailable {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Scan, count, build the code and write the four output files for `input`.
///
/// Every destination is opened before any work starts, so an unwritable one fails the run
/// early. Tokens are shuffled with the configured seed before counting. The bit-stream
/// encodes them in their original order, so decoding reproduces the text's word sequence.
pub fn encode_file(input: &Path, config: &EncodeConfig) -> Result<EncodeReport> {
    info!("Encoding {}", input.display());
    check_input(input)?;
    check_output_dir(&config.output_dir)?;

    let paths = OutputPaths::new(input, &config.output_dir);
    let mut tokens_sink = open_sink(&paths.tokens)?;
    let mut freq_sink = open_sink(&paths.freq)?;
    let mut header_sink = open_sink(&paths.header)?;
    let mut code_sink = open_sink(&paths.code)?;

    let tokens = Scanner::new(input).tokenize()?;
    write_tokens(&tokens, &mut tokens_sink)?;

    let mut shuffled: Vec<&str> = tokens.iter().map(String::as_str).collect();
    shuffled.shuffle(&mut StdRng::seed_from_u64(config.shuffle_seed));
    let table: FrequencyTable = shuffled.into_iter().collect();
    let counts = table.collect_sorted();
    debug!(
        "Frequency table: {} words, height {}",
        table.len(),
        table.height()
    );

    write_frequency_report(&counts, &mut freq_sink)?;

    let coder = HuffmanCoder::from_counts(&counts);
    coder.write_header(&mut header_sink)?;
    let total_bits = coder.encode(&tokens, &mut code_sink, config.wrap_column)?;

    let report = EncodeReport {
        total_tokens: tokens.len(),
        distinct_words: table.len(),
        table_height: table.height(),
        min_frequency: table.min_frequency(),
        max_frequency: table.max_frequency(),
        total_letters: tokens.iter().map(String::len).sum(),
        total_bits,
        paths,
    };
    info!(
        "Encoded {} tokens ({} distinct) into {} bits",
        report.total_tokens, report.distinct_words, report.total_bits
    );
    Ok(report)
}

/// Rebuild the token sequence from a header file and a bit-stream file.
pub fn decode_files(header: &Path, code: &Path) -> Result<Vec<String>> {
    info!("Decoding {} with {}", code.display(), header.display());
    let book = CodeBook::parse(open_source(header)?)?;
    let tokens = book.decode(open_source(code)?)?;
    info!("Decoded {} tokens", tokens.len());
    Ok(tokens)
}
