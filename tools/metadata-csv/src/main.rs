//! Metadata to CSV
//!
//! Reads every article metadata tag file in a directory and writes their
//! attributes as one CSV table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use scitext_core::{ProgressBarReporter, extract_directory_with_progress};
use scitext_core::metadata::DEFAULT_METADATA_EXTENSION;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "metadata-csv")]
#[command(about = "Collect article metadata tag files into a single CSV table")]
#[command(version)]
struct Cli {
    /// Directory of metadata files
    #[arg(short, long, env = "SCITEXT_METADATA_DIR")]
    input: PathBuf,

    /// CSV file to write
    #[arg(short, long, env = "SCITEXT_METADATA_CSV")]
    output: PathBuf,

    /// Metadata file extension
    #[arg(short, long, default_value = DEFAULT_METADATA_EXTENSION)]
    extension: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let progress = ProgressBarReporter::new("metadata");
    let batch = extract_directory_with_progress(&cli.input, &cli.extension, &progress)
        .with_context(|| format!("Failed to read metadata from {}", cli.input.display()))?;

    for failed in &batch.failed {
        warn!(file = %failed.file_name, reason = %failed.reason, "error processing metadata file");
    }

    batch
        .table
        .write_csv_to_path(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    info!(
        rows = batch.table.len(),
        columns = batch.table.columns().len(),
        output = %cli.output.display(),
        "wrote metadata table"
    );
    Ok(())
}
