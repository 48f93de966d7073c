use std::fs;
use std::path::PathBuf;

use word_huffman::pipeline::{self, EncodeConfig};
use word_huffman::Error;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("word-huffman-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const TEXT: &str = "The cat and the dog. The dog's bone!\nDon't let the cat near the bone.\n";

#[test]
fn encode_then_decode_files() {
    let dir = scratch_dir("roundtrip");
    let input = dir.join("story.txt");
    fs::write(&input, TEXT).unwrap();

    let config = EncodeConfig {
        output_dir: dir.clone(),
        wrap_column: 16,
        ..Default::default()
    };
    let report = pipeline::encode_file(&input, &config).unwrap();

    let expected = word_huffman::tokenize(TEXT);
    assert_eq!(report.total_tokens, expected.len());
    assert_eq!(report.distinct_words, 9);
    assert_eq!(report.max_frequency, 5);
    assert_eq!(report.min_frequency, 1);
    assert_eq!(report.total_letters, expected.iter().map(String::len).sum::<usize>());
    assert_eq!(report.paths.header, dir.join("story.hdr"));

    let listed = fs::read_to_string(&report.paths.tokens).unwrap();
    assert_eq!(listed.lines().collect::<Vec<_>>(), expected);

    let freq = fs::read_to_string(&report.paths.freq).unwrap();
    assert_eq!(freq.lines().next(), Some("         5 the"));
    assert_eq!(freq.lines().count(), 9);

    let code = fs::read_to_string(&report.paths.code).unwrap();
    assert!(code.lines().all(|line| line.len() <= 16));
    let bits = code.bytes().filter(|b| *b != b'\n').count() as u64;
    assert_eq!(bits, report.total_bits);

    let decoded = pipeline::decode_files(&report.paths.header, &report.paths.code).unwrap();
    assert_eq!(decoded, expected);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn same_seed_same_report() {
    let dir = scratch_dir("seed");
    let input = dir.join("words.txt");
    fs::write(&input, "a b c d e f g h i j k l m n o p a b c a").unwrap();

    let config = EncodeConfig {
        output_dir: dir.clone(),
        ..Default::default()
    };
    let first = pipeline::encode_file(&input, &config).unwrap();
    let header = fs::read(&first.paths.header).unwrap();
    let second = pipeline::encode_file(&input, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&second.paths.header).unwrap(), header);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_input_writes_empty_outputs() {
    let dir = scratch_dir("empty");
    let input = dir.join("blank.txt");
    fs::write(&input, "123 ... !!!").unwrap();

    let config = EncodeConfig {
        output_dir: dir.clone(),
        ..Default::default()
    };
    let report = pipeline::encode_file(&input, &config).unwrap();
    assert_eq!(report.total_tokens, 0);
    assert_eq!(report.table_height, 0);
    assert_eq!(fs::read(&report.paths.header).unwrap(), b"");
    assert_eq!(fs::read(&report.paths.code).unwrap(), b"");

    let decoded = pipeline::decode_files(&report.paths.header, &report.paths.code).unwrap();
    assert!(decoded.is_empty());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_and_output_dir() {
    let dir = scratch_dir("missing");

    let err = pipeline::encode_file(&dir.join("nope.txt"), &EncodeConfig::default()).unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }));

    let err = pipeline::encode_file(&dir, &EncodeConfig::default()).unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }));

    let input = dir.join("ok.txt");
    fs::write(&input, "hello").unwrap();
    let config = EncodeConfig {
        output_dir: dir.join("no-such-dir"),
        ..Default::default()
    };
    let err = pipeline::encode_file(&input, &config).unwrap_err();
    assert!(matches!(err, Error::SinkUnavailable { .. }));

    fs::remove_dir_all(&dir).unwrap();
}
