//! Command-line driver.
//!
//! ```bash
//! huff7 encode input.txt input.huf
//! huff7 decode input.txt input.huf decoded.txt
//! ```
//!
//! The encoded file carries no tree, so decoding rebuilds it from the same
//! source text.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use huff7::stream::{read_symbols, write_symbols};
use huff7::HuffmanCode;

#[derive(Parser, Debug)]
#[command(name = "huff7")]
#[command(version)]
#[command(about = "Static Huffman coding for 7-bit text", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a code from TEXT and write TEXT encoded to OUTPUT
    Encode { text: PathBuf, output: PathBuf },
    /// Rebuild the code from TEXT and decode ENCODED into OUTPUT
    Decode {
        text: PathBuf,
        encoded: PathBuf,
        output: PathBuf,
    },
}

fn load_code(text: &Path) -> huff7::Result<HuffmanCode> {
    let symbols = read_symbols(&mut BufReader::new(File::open(text)?))?;
    HuffmanCode::from_symbols(&symbols)
}

fn run(command: &Command) -> huff7::Result<()> {
    match command {
        Command::Encode { text, output } => {
            let code = load_code(text)?;
            // Second pass over the source for the payload.
            let symbols = read_symbols(&mut BufReader::new(File::open(text)?))?;
            let mut out = BufWriter::new(File::create(output)?);
            code.encoder().encode_to(&symbols, &mut out)?;
            info!(
                symbols = symbols.len(),
                bits_per_symbol = code.expected_length(),
                "encoded {}",
                output.display()
            );
        }
        Command::Decode {
            text,
            encoded,
            output,
        } => {
            let code = load_code(text)?;
            let bytes = std::fs::read(encoded)?;
            let symbols = code.decompress(&bytes)?;
            write_symbols(&mut BufWriter::new(File::create(output)?), &symbols)?;
            info!(symbols = symbols.len(), "decoded {}", output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install tracing subscriber");
    }

    match run(&args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("huff7: {e}");
            ExitCode::FAILURE
        }
    }
}
