//! Article Embeddings
//!
//! Embeds every article text (or JSON summary) in a directory with a local
//! fastembed model and writes an id-to-vector JSON object.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scitext_core::embedding::{DEFAULT_BATCH_SIZE, FastEmbedProvider};
use scitext_core::{EmbeddingInput, ProgressBarReporter, embed_corpus, load_corpus};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Kind of files to embed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum InputFormat {
    /// `<id>.txt` article texts
    Text,
    /// `<id>.json` summaries with `revised_title` and `tldr`
    Json,
}

impl From<InputFormat> for EmbeddingInput {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Text => EmbeddingInput::Texts,
            InputFormat::Json => EmbeddingInput::JsonSummaries,
        }
    }
}

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "embed-texts")]
#[command(about = "Embed article texts or summaries and save the vectors as JSON")]
#[command(version)]
struct Cli {
    /// Directory of article texts or JSON summaries
    #[arg(short, long, env = "SCITEXT_EMBED_INPUT")]
    input: PathBuf,

    /// JSON file to write the id-to-vector map to
    #[arg(short, long, env = "SCITEXT_EMBED_OUTPUT")]
    output: PathBuf,

    /// Embedding model (e.g. bge-small-en-v1.5, BAAI/bge-base-en-v1.5)
    #[arg(short, long, env = "SCITEXT_EMBED_MODEL", default_value = "bge-small-en-v1.5")]
    model: String,

    /// Input file format
    #[arg(short, long, value_enum, default_value_t = InputFormat::Text)]
    format: InputFormat,

    /// Texts per model call
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Directory for downloaded model files
    #[arg(long, env = "SCITEXT_MODEL_CACHE")]
    cache_dir: Option<PathBuf>,
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
    if cli.batch_size == 0 {
        anyhow::bail!("--batch-size must be at least 1");
    }

    let documents = load_corpus(&cli.input, cli.format.into())
        .with_context(|| format!("Failed to read articles from {}", cli.input.display()))?;
    println!("Number of articles: {}", documents.len());

    let provider = FastEmbedProvider::new(&cli.model, cli.cache_dir.as_deref())
        .with_context(|| format!("Failed to load embedding model {}", cli.model))?;
    println!("The model {} is ready to use.", cli.model);

    let progress = ProgressBarReporter::new("embed");
    let embeddings = embed_corpus(&documents, &provider, cli.batch_size, &progress)
        .context("Embedding failed")?;

    embeddings
        .write_json(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    info!(
        embeddings = embeddings.len(),
        output = %cli.output.display(),
        "wrote embeddings"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli =
            Cli::try_parse_from(["embed-texts", "--input", "texts", "--output", "emb.json"])
                .unwrap();
        assert_eq!(cli.model, "bge-small-en-v1.5");
        assert_eq!(cli.format, InputFormat::Text);
        assert_eq!(cli.batch_size, DEFAULT_BATCH_SIZE);
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_cli_json_summaries() {
        let cli = Cli::try_parse_from([
            "embed-texts",
            "-i",
            "json_files",
            "-o",
            "emb.json",
            "--model",
            "BAAI/bge-base-en-v1.5",
            "--format",
            "json",
            "--batch-size",
            "8",
        ])
        .unwrap();
        assert_eq!(cli.model, "BAAI/bge-base-en-v1.5");
        assert_eq!(EmbeddingInput::from(cli.format), EmbeddingInput::JsonSummaries);
        assert_eq!(cli.batch_size, 8);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(
            Cli::try_parse_from(["embed-texts", "-i", "x", "-o", "y", "--format", "yaml"])
                .is_err()
        );
    }
}
