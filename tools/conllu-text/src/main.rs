//! CoNLL-U to Plain Text
//!
//! Rebuilds one plain-text file per annotated article, falling back to the
//! raw OCR text when an annotation file holds no sentences, and reports the
//! articles for which neither source produced anything.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use scitext_core::batch::DEFAULT_ANNOTATION_EXTENSION;
use scitext_core::{
    BatchConfig, DEFAULT_FALLBACK_PREFIX, ProgressBarReporter, RunReport, run_batch_with_progress,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "conllu-text")]
#[command(about = "Reconstruct plain-text articles from CoNLL-U annotation files")]
#[command(version)]
struct Cli {
    /// Directory of annotation files
    #[arg(short, long, env = "SCITEXT_INPUT_DIR")]
    input: PathBuf,

    /// Directory of raw-text fallback files
    #[arg(short, long, env = "SCITEXT_RAW_DIR")]
    raw_dir: PathBuf,

    /// Directory to write plain-text articles to
    #[arg(short, long, env = "SCITEXT_OUTPUT_DIR")]
    output: PathBuf,

    /// Annotation file extension
    #[arg(short, long, default_value = DEFAULT_ANNOTATION_EXTENSION)]
    extension: String,

    /// File name prefix of raw-text fallback files
    #[arg(short, long, env = "SCITEXT_FALLBACK_PREFIX", default_value = DEFAULT_FALLBACK_PREFIX)]
    prefix: String,

    /// Number of worker threads (1 = sequential)
    #[arg(short, long, env = "SCITEXT_JOBS", default_value_t = 1)]
    jobs: usize,

    /// Write the run report as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write whitespace-only raw fallbacks instead of treating them as missing
    #[arg(long)]
    keep_empty_fallback: bool,
}

impl Cli {
    fn batch_config(&self) -> BatchConfig {
        BatchConfig::new(&self.input, &self.raw_dir, &self.output)
            .with_extension(&self.extension)
            .with_fallback_prefix(&self.prefix)
            .with_workers(self.jobs)
            .with_skip_empty_fallback(!self.keep_empty_fallback)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print the list of unrecoverable files and their count.
fn print_summary<W: Write>(out: &mut W, report: &RunReport) -> std::io::Result<()> {
    writeln!(out, "Files with empty sentences:")?;
    for file_name in &report.unrecoverable {
        writeln!(out, "{file_name}")?;
    }
    writeln!(out, "Number of empty files: {}", report.unrecoverable.len())
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!(path = %path.display(), "wrote run report");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.jobs == 0 {
        anyhow::bail!("--jobs must be at least 1");
    }

    let config = cli.batch_config();
    let progress = ProgressBarReporter::new("reconstruct");
    let report = run_batch_with_progress(&config, &progress)
        .context("Reconstruction batch failed to start")?;

    for failed in &report.failed {
        warn!(document = %failed.file_name, reason = %failed.reason, "document failed");
    }

    let stdout = std::io::stdout();
    print_summary(&mut stdout.lock(), &report)?;

    if let Some(path) = &cli.report {
        write_report(path, &report)?;
    }

    Ok(())
}
