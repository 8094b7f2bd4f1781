use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;

use flow_meta_index::config::LogFormat;
use flow_meta_index::domain::validation::Validation;
use flow_meta_index::dto::IngestOutcomeDto;
use flow_meta_index::infrastructure::hashing::ContentHasher;
use flow_meta_index::ports::{ContentRepository, DocumentRepository};
use flow_meta_index::value_objects::DocumentId;
use flow_meta_index::{telemetry, ApplicationBuilder, Config, IngestOutcome};

/// Run a meta document through the indexing pipeline and print the result
#[derive(Parser)]
struct Cli {
    /// Meta document as hex, with or without 0x
    meta: Option<String>,

    /// Read the document from a file instead (hex text, or bytes with --raw)
    #[arg(long, conflicts_with = "meta")]
    file: Option<PathBuf>,

    /// Treat --file contents as raw bytes
    #[arg(long, requires = "file")]
    raw: bool,

    /// Document ID to index under; defaults to the hash of the document
    #[arg(long)]
    document_id: Option<String>,

    /// TOML config file; environment variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log as JSON
    #[arg(long)]
    json: bool,
}

fn read_meta(cli: &Cli) -> anyhow::Result<Vec<u8>> {
    let text = match (&cli.meta, &cli.file) {
        (Some(meta), _) => meta.clone(),
        (None, Some(path)) if cli.raw => {
            return std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => bail!("pass a hex document or --file"),
    };

    let text = text.trim();
    let digits = text.strip_prefix("0x").unwrap_or(text);
    Validation::decode_hex(digits, "meta").context("meta is not valid hex")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path).map_err(anyhow::Error::msg)?,
        None => Config::from_env(),
    };
    if cli.json {
        config.log_format = LogFormat::Json;
    }
    config.validate().map_err(anyhow::Error::msg)?;
    telemetry::init_tracing(&config).map_err(|e| anyhow::anyhow!(e))?;

    let meta = read_meta(&cli)?;
    let state = ApplicationBuilder::new(config)
        .with_in_memory_stores()
        .build()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let document_id = match &cli.document_id {
        Some(id) => DocumentId::new(id.as_str())?,
        None => DocumentId::from_content_address(&ContentHasher::hash_bytes(&meta)),
    };
    let outcome = state.ingest_use_case.execute(&meta, &document_id)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&IngestOutcomeDto::from(&outcome))?
    );

    if let IngestOutcome::Indexed(indexed) = &outcome {
        let entries = state
            .query_use_case
            .content_for_document(indexed.document_id.as_str())?;
        println!("{}", serde_json::to_string_pretty(&entries)?);

        let documents = state
            .query_use_case
            .documents_for(indexed.document_id.as_str())?;
        println!("{}", serde_json::to_string_pretty(&documents)?);
    }

    eprintln!(
        "{} content entries, {} documents",
        state.content_repo.count()?,
        state.document_repo.count()?
    );

    Ok(())
}
