//! Data structures produced while rewriting documents.

use std::path::PathBuf;

use serde::Serialize;

/// Syntactic context an external URL was discovered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceContext {
  /// `src="…"` attribute.
  AttributeSrc,
  /// CSS `url(…)` function call.
  StyleUrlFunction,
  /// `href="…"` pointing at a recognised contact host.
  ContactHref,
}

/// A URL found inside an envelope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExternalReference {
  /// URL exactly as written in the markup.
  pub raw_url: String,
  /// Envelope the URL was matched in.
  pub context: ReferenceContext,
}

/// Rewriting pass applied to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
  /// External image localization.
  Images,
  /// Contact link normalisation.
  Links,
}

/// A URL that could not be localized, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUrl {
  /// URL as written in the markup.
  pub url: String,
  /// Human readable failure reason.
  pub reason: String,
}

/// Outcome of one pass over one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
  /// Document path.
  pub path: PathBuf,
  /// Pass that produced this report.
  pub pass: PassKind,
  /// Distinct URLs discovered in the document.
  pub discovered: usize,
  /// URLs resolved to a local asset, cached or freshly downloaded.
  pub localized: usize,
  /// URLs that were downloaded during this run.
  pub downloaded: usize,
  /// URLs skipped because they matched an exclusion rule.
  pub excluded: usize,
  /// URLs left untouched because localization failed.
  pub failed: Vec<FailedUrl>,
  /// Number of envelope sites rewritten.
  pub substitutions: usize,
  /// Whether the document was written back.
  pub written: bool,
  /// Why the document was skipped or not saved, if it was.
  pub error: Option<String>,
}

impl DocumentReport {
  /// Empty report for `path` and `pass`.
  pub fn new(path: PathBuf, pass: PassKind) -> Self {
    Self {
      path,
      pass,
      discovered: 0,
      localized: 0,
      downloaded: 0,
      excluded: 0,
      failed: Vec::new(),
      substitutions: 0,
      written: false,
      error: None,
    }
  }

  /// Report for a document that could not be processed at all.
  pub fn skipped(path: PathBuf, pass: PassKind, error: impl Into<String>) -> Self {
    Self {
      error: Some(error.into()),
      ..Self::new(path, pass)
    }
  }
}

/// Serialisable summary of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
  /// Per document, per pass outcomes in processing order.
  pub documents: Vec<DocumentReport>,
}

impl RunReport {
  /// Total number of envelope sites rewritten.
  pub fn substitutions(&self) -> usize {
    self.documents.iter().map(|report| report.substitutions).sum()
  }

  /// Total number of assets downloaded during the run.
  pub fn downloads(&self) -> usize {
    self.documents.iter().map(|report| report.downloaded).sum()
  }

  /// Total number of URLs that failed to localize.
  pub fn failures(&self) -> usize {
    self.documents.iter().map(|report| report.failed.len()).sum()
  }

  /// Number of documents written back to disk.
  pub fn written(&self) -> usize {
    self.documents.iter().filter(|report| report.written).count()
  }

  /// Documents skipped or not saved because of an error.
  pub fn errors(&self) -> impl Iterator<Item = &DocumentReport> {
    self.documents.iter().filter(|report| report.error.is_some())
  }
}
