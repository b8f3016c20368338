//! Image localization pass: external `src`/`url()` images become cached WebP files.

use std::path::Path;

use tracing::{info, warn};

use crate::asset::{AssetLocalizer, AssetOrigin, Fetch};
use crate::document::Document;
use crate::models::{DocumentReport, FailedUrl, PassKind};
use crate::rewrite::{ReplacementMap, discover, image_envelopes, substitute_all};
use crate::selection::UrlInclusion;

/// Localize every external image referenced by the document at `path`.
///
/// Failures are confined to the URL or document they occur in and are recorded in the
/// returned report. The document is written back once processing finishes, even when no
/// reference changed.
pub fn localize_document<F: Fetch, S: UrlInclusion>(
  localizer: &AssetLocalizer<F>,
  selection: &S,
  path: &Path,
) -> DocumentReport {
  info!(path = %path.display(), "localizing images");

  let mut document = match Document::load(path) {
    Ok(document) => document,
    Err(err) => {
      warn!(path = %path.display(), "{err}");
      return DocumentReport::skipped(path.to_path_buf(), PassKind::Images, err.to_string());
    }
  };

  let mut report = DocumentReport::new(path.to_path_buf(), PassKind::Images);
  let envelopes = image_envelopes();
  let urls = discover(&document.text, &envelopes);
  report.discovered = urls.len();
  info!(count = urls.len(), "found external images");

  let mut replacements = ReplacementMap::new();
  for url in urls {
    if !selection.is_included(&url) {
      report.excluded += 1;
      continue;
    }

    match localizer.localize(&url) {
      Ok(asset) => {
        report.localized += 1;
        if asset.origin == AssetOrigin::Downloaded {
          report.downloaded += 1;
        }
        replacements.insert(url, asset.reference);
      }
      Err(err) => {
        warn!(url = %url, "failed to localize: {err}");
        report.failed.push(FailedUrl {
          url,
          reason: err.to_string(),
        });
      }
    }
  }

  let rewritten = substitute_all(&document.text, &envelopes, &replacements);
  report.substitutions = rewritten.count;
  document.text = rewritten.text;

  match document.save() {
    Ok(()) => {
      report.written = true;
      info!(path = %path.display(), substitutions = report.substitutions, "updated");
    }
    Err(err) => {
      warn!("{err}");
      report.error = Some(err.to_string());
    }
  }

  report
}
