//! Run orchestrator applying the selected passes to every configured document.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::asset::{AssetLocalizer, Fetch, FetchError, HttpFetcher};
use crate::asset_paths::ContentCache;
use crate::config::ProjectConfig;
use crate::models::RunReport;
use crate::passes::{LinkNormalizer, localize_document};
use crate::selection::UrlSelection;

/// Which passes a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Localize external images only.
  Images,
  /// Normalise contact links only.
  Links,
  /// Localize images, then normalise links.
  All,
}

impl Mode {
  fn runs_images(self) -> bool {
    matches!(self, Mode::Images | Mode::All)
  }

  fn runs_links(self) -> bool {
    matches!(self, Mode::Links | Mode::All)
  }
}

/// Sequential rewriter over an ordered list of documents.
pub struct Pipeline<F> {
  documents: Vec<PathBuf>,
  localizer: AssetLocalizer<F>,
  selection: UrlSelection,
  links: LinkNormalizer,
}

impl Pipeline<HttpFetcher> {
  /// Build a pipeline that downloads over HTTP using the configured timeout and user agent.
  pub fn from_config(root: &Path, config: &ProjectConfig) -> Result<Self, FetchError> {
    let fetcher = HttpFetcher::new(config.request_timeout(), &config.user_agent)?;
    Ok(Self::new(root, config, fetcher))
  }
}

impl<F: Fetch> Pipeline<F> {
  /// Build a pipeline for the project at `root` using `fetcher` for downloads.
  pub fn new(root: &Path, config: &ProjectConfig, fetcher: F) -> Self {
    let cache = ContentCache::new(root, &config.assets_dir);
    Self {
      documents: config.document_paths(root),
      localizer: AssetLocalizer::new(cache, fetcher, config.transcode_options()),
      selection: UrlSelection::excluding(config.exclude_urls.iter().cloned()),
      links: LinkNormalizer::new(config.link_target.clone(), &config.link_hosts),
    }
  }

  /// Replace the configured document list.
  pub fn with_documents(mut self, documents: Vec<PathBuf>) -> Self {
    self.documents = documents;
    self
  }

  /// Apply the passes selected by `mode` to every document.
  ///
  /// Each pass walks the full document list before the next one starts. Per URL and per
  /// document failures end up in the report; they never stop the run.
  pub fn run(&self, mode: Mode) -> RunReport {
    let mut report = RunReport::default();

    if mode.runs_images() {
      for path in &self.documents {
        report
          .documents
          .push(localize_document(&self.localizer, &self.selection, path));
      }
    }

    if mode.runs_links() {
      for path in &self.documents {
        report.documents.push(self.links.normalize_document(path));
      }
    }

    info!(
      documents = self.documents.len(),
      written = report.written(),
      substitutions = report.substitutions(),
      downloads = report.downloads(),
      failures = report.failures(),
      "run complete"
    );
    report
  }
}
