//! Command line entry point for localizing images and normalising links in HTML documents.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use offline_html_localizer::{Mode, Pipeline, ProjectConfig};

/// Localize external images and normalise contact links in static HTML documents.
#[derive(Debug, Parser)]
#[command(name = "offline-localize", version, about)]
struct Cli {
  /// Project root that documents and the assets directory are relative to.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Configuration file; defaults to `localize.config.json` in the root when present.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Write the run report as JSON to this path.
  #[arg(long)]
  report: Option<PathBuf>,

  /// Passes to run.
  #[arg(value_enum)]
  mode: ModeArg,

  /// Documents to process instead of the configured list.
  documents: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
  /// Download, shrink and re-encode external images.
  Images,
  /// Point contact links at the configured target.
  Links,
  /// Both passes, images first.
  All,
}

impl From<ModeArg> for Mode {
  fn from(value: ModeArg) -> Self {
    match value {
      ModeArg::Images => Mode::Images,
      ModeArg::Links => Mode::Links,
      ModeArg::All => Mode::All,
    }
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let config = match &cli.config {
    Some(path) => ProjectConfig::load(path)?,
    None => ProjectConfig::discover(&cli.root),
  };

  let mut pipeline =
    Pipeline::from_config(&cli.root, &config).context("failed to create HTTP client")?;
  if !cli.documents.is_empty() {
    let documents = cli
      .documents
      .iter()
      .map(|document| cli.root.join(document))
      .collect();
    pipeline = pipeline.with_documents(documents);
  }

  let report = pipeline.run(cli.mode.into());
  for document in report.errors() {
    if let Some(error) = &document.error {
      warn!(path = %document.path.display(), "{error}");
    }
  }

  if let Some(path) = &cli.report {
    let json = serde_json::to_string_pretty(&report).context("failed to serialise run report")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
  }

  Ok(())
}
