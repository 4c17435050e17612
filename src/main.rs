//! frugen CLI entry point.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use frugen::{EncoderConfig, FruConfig, FruEncoder, LengthOverflow};

/// frugen - IPMI FRU image generator
#[derive(Parser, Debug)]
#[command(name = "frugen")]
#[command(about = "Generate an IPMI FRU information storage image from a JSON description")]
#[command(version)]
struct Cli {
    /// FRU config file in JSON format
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Output FRU data filename
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Keep the low 6 bits of overlong field lengths instead of failing
    #[arg(long)]
    truncate_lengths: bool,

    /// Set the end-of-list flag on the last multirecord
    #[arg(long)]
    mark_end_of_list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    tracing::debug!(version = frugen::VERSION, "starting frugen");

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "generation failed");
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> frugen::Result<()> {
    let overflow = if cli.truncate_lengths {
        LengthOverflow::Truncate
    } else {
        LengthOverflow::Reject
    };
    let encoder = FruEncoder::new(
        EncoderConfig::new()
            .with_length_overflow(overflow)
            .with_end_of_list_marker(cli.mark_end_of_list),
    );

    let config = FruConfig::load(&cli.config)?;
    let image = encoder.encode(&config)?;
    for (area, field_type) in image.unimplemented_fields() {
        tracing::warn!(area = %area, field_type = %field_type, "custom field skipped, no encoder for its type");
    }

    write_atomic(&cli.output, &image.to_bytes())?;
    tracing::info!(path = %cli.output.display(), len = image.len(), "wrote FRU image");
    Ok(())
}

/// Writes through a sibling temporary file so the output is either complete or untouched.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

/// Initialize the tracing subscriber.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frugen=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
