//! Contact link normalisation pass.

use std::path::Path;

use tracing::{info, warn};

use crate::document::Document;
use crate::models::{DocumentReport, PassKind};
use crate::rewrite::{Envelope, ReplacementMap, Substitution, discover, substitute};

/// Rewrites every recognised contact link to one canonical destination.
#[derive(Debug, Clone)]
pub struct LinkNormalizer {
  envelope: Option<Envelope>,
  target: String,
}

impl LinkNormalizer {
  /// Normalise `href` links on any of `hosts` to `target`.
  pub fn new<S: AsRef<str>>(target: impl Into<String>, hosts: &[S]) -> Self {
    Self {
      envelope: Envelope::contact_href(hosts),
      target: target.into(),
    }
  }

  /// Rewrite links in `text`, keeping each site's quote character.
  pub fn normalize(&self, text: &str) -> Substitution {
    let Some(envelope) = &self.envelope else {
      return Substitution {
        text: text.to_string(),
        count: 0,
      };
    };

    let replacements: ReplacementMap = discover(text, &[envelope])
      .into_iter()
      .map(|url| (url, self.target.clone()))
      .collect();
    substitute(text, envelope, &replacements)
  }

  /// Normalise links in the document at `path`, writing it back only if something changed.
  pub fn normalize_document(&self, path: &Path) -> DocumentReport {
    info!(path = %path.display(), "normalising links");

    let mut document = match Document::load(path) {
      Ok(document) => document,
      Err(err) => {
        warn!(path = %path.display(), "{err}");
        return DocumentReport::skipped(path.to_path_buf(), PassKind::Links, err.to_string());
      }
    };

    let mut report = DocumentReport::new(path.to_path_buf(), PassKind::Links);
    let rewritten = self.normalize(&document.text);
    report.substitutions = rewritten.count;

    if rewritten.count == 0 {
      info!(path = %path.display(), "no contact links found");
      return report;
    }

    document.text = rewritten.text;
    match document.save() {
      Ok(()) => {
        report.written = true;
        info!(path = %path.display(), count = rewritten.count, "updated links");
      }
      Err(err) => {
        warn!("{err}");
        report.error = Some(err.to_string());
      }
    }

    report
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  const TARGET: &str = "https://wa.link/1nxmx6";

  fn normalizer() -> LinkNormalizer {
    LinkNormalizer::new(TARGET, &["wa.me", "api.whatsapp.com"])
  }

  #[test]
  fn preserves_single_quotes() {
    let result = normalizer().normalize("<a href='https://wa.me/123'>chat</a>");
    assert_eq!(result.count, 1);
    assert_eq!(result.text, format!("<a href='{TARGET}'>chat</a>"));
  }

  #[test]
  fn preserves_double_quotes() {
    let result =
      normalizer().normalize(r#"<a class="btn" href="https://api.whatsapp.com/send?phone=1">x</a>"#);
    assert_eq!(result.count, 1);
    assert_eq!(result.text, format!(r#"<a class="btn" href="{TARGET}">x</a>"#));
  }

  #[test]
  fn balances_mismatched_quotes() {
    let result = normalizer().normalize(r#"<a href="https://wa.me/123'>chat</a>"#);
    assert_eq!(result.count, 1);
    assert_eq!(result.text, format!(r#"<a href="{TARGET}">chat</a>"#));
  }

  #[test]
  fn counts_every_site_including_repeats() {
    let text = r#"<a href="https://wa.me/1">a</a><a href="https://wa.me/1">b</a><a href="http://wa.me/2">c</a>"#;
    let result = normalizer().normalize(text);
    assert_eq!(result.count, 3);
    assert!(!result.text.contains("wa.me"));
  }

  #[test]
  fn ignores_other_hosts_and_bare_mentions() {
    let text = r#"<a href="https://example.com/contact">x</a><p>https://wa.me/123</p><a href="https://wa.me/">y</a>"#;
    let result = normalizer().normalize(text);
    assert_eq!(result.count, 0);
    assert_eq!(result.text, text);
  }

  #[test]
  fn no_hosts_means_no_rewrites() {
    let result = LinkNormalizer::new(TARGET, &[] as &[&str]).normalize(r#"<a href="https://wa.me/1">"#);
    assert_eq!(result.count, 0);
  }

  #[test]
  fn writes_documents_with_links() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("page.html");
    fs::write(&path, r#"<a href="https://wa.me/5511999">talk</a>"#).unwrap();

    let report = normalizer().normalize_document(&path);
    assert_eq!(report.substitutions, 1);
    assert!(report.written);
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      format!(r#"<a href="{TARGET}">talk</a>"#)
    );
  }

  #[test]
  fn leaves_documents_without_links_untouched() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("page.html");
    fs::write(&path, r#"<a href="https://example.com">home</a>"#).unwrap();
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    let report = normalizer().normalize_document(&path);

    assert_eq!(report.substitutions, 0);
    assert!(!report.written);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"<a href="https://example.com">home</a>"#);
  }

  #[test]
  fn skips_missing_documents() {
    let temp = tempdir().unwrap();
    let report = normalizer().normalize_document(&temp.path().join("absent.html"));
    assert!(report.error.is_some());
    assert!(!report.written);
  }
}
