use std::env;
use std::path::Path;
use std::process;

use log::{error, info, warn};

use word_huffman::pipeline::{self, EncodeConfig};

fn parse_args(args: &[String]) -> Option<(String, EncodeConfig)> {
    let mut input = None;
    let mut output_dir = None;
    let mut config = EncodeConfig::default();

    for arg in args.iter().skip(1) {
        if let Some(value) = arg.strip_prefix("--wrap=") {
            match value.parse::<usize>() {
                Ok(n) => config.wrap_column = n,
                Err(_) => warn!("Ignoring invalid wrap column '{}'", value),
            }
        } else if let Some(value) = arg.strip_prefix("--seed=") {
            match value.parse::<u64>() {
                Ok(n) => config.shuffle_seed = n,
                Err(_) => warn!("Ignoring invalid seed '{}'", value),
            }
        } else if input.is_none() {
            input = Some(arg.clone());
        } else if output_dir.is_none() {
            output_dir = Some(arg.clone());
        } else {
            warn!("Ignoring extra argument '{}'", arg);
        }
    }

    if let Some(dir) = output_dir {
        config.output_dir = dir.into();
    }

    input.map(|input| (input, config))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some((input, config)) = parse_args(&args) else {
        eprintln!(
            "Usage: {} <input_file> [output_dir] [--wrap=N] [--seed=N]",
            args.first().map_or("encode", String::as_str)
        );
        eprintln!("  <input_file>:  text file to encode.");
        eprintln!(
            "  [output_dir]:  existing directory for the output files (default '{}').",
            pipeline::DEFAULT_OUTPUT_DIR
        );
        eprintln!("  --wrap=N:      bits per line in the .code file, 0 for no wrapping.");
        eprintln!("  --seed=N:      shuffle seed used before counting.");
        process::exit(1);
    };

    info!("--- Start Encoding ---");

    let report = match pipeline::encode_file(Path::new(&input), &config) {
        Ok(report) => report,
        Err(e) => {
            error!("Encoding failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("{}", report);
    println!(
        "\nWrote {}, {}, {} and {}",
        report.paths.tokens.display(),
        report.paths.freq.display(),
        report.paths.header.display(),
        report.paths.code.display()
    );

    info!("--- End ---");
}
