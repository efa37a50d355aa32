//! CV Pagination CLI
//!
//! Usage:
//!   cv-paginate [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>    Engine configuration (TOML format)
//!   -f, --format <FORMAT>  Output format: text or json
//!   -v, --verbose          Log page breaks (repeat for more detail)
//!   -h, --help             Print help

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use cv_pagination::{
    paginate_with_config, render_text, DocumentFile, PaginationConfig, PaginationResult,
    TomlSource,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "cv-paginate")]
#[command(about = "Predict how a measured résumé flow breaks across pages")]
struct Cli {
    /// Document file, .toml or .json (reads TOML from stdin if not provided)
    input: Option<PathBuf>,

    /// Engine configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log page breaks and placement decisions to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => match PaginationConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => PaginationConfig::default(),
    };

    let result = match &cli.input {
        Some(path) => paginate_with_config(&DocumentFile::new(path), &config),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                process::exit(1);
            }
            paginate_with_config(&TomlSource(buffer), &config)
        }
    };

    match result {
        Ok(result) => print_result(&result, cli.format),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_result(result: &PaginationResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error encoding result: {}", e);
                process::exit(1);
            }
        },
    }
}
