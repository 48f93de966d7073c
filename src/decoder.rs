use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use log::{error, info};

use word_huffman::pipeline;
use word_huffman::scanner::write_tokens;

fn run(header: &Path, code: &Path, output: Option<&Path>) -> word_huffman::Result<usize> {
    let tokens = pipeline::decode_files(header, code)?;

    match output {
        Some(path) => {
            info!("Writing decoded tokens to {}", path.display());
            let mut sink = pipeline::open_sink(path)?;
            write_tokens(&tokens, &mut sink)?;
        }
        None => {
            let stdout = io::stdout();
            let mut sink = io::BufWriter::new(stdout.lock());
            write_tokens(&tokens, &mut sink)?;
            sink.flush()?;
        }
    }

    Ok(tokens.len())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <header_file> <code_file> [output_file]",
            args.first().map_or("decode", String::as_str)
        );
        eprintln!("  <header_file>: the .hdr file written by the encoder.");
        eprintln!("  <code_file>:   the .code file written by the encoder.");
        eprintln!("  [output_file]: where to write the tokens, one per line (default stdout).");
        process::exit(1);
    }

    info!("--- Start Decoding ---");

    let output = args.get(3).map(Path::new);
    match run(Path::new(&args[1]), Path::new(&args[2]), output) {
        Ok(count) => info!("Decoded {} tokens", count),
        Err(e) => {
            error!("Decoding failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    info!("--- End ---");
}
