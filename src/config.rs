//! Project configuration loader describing documents, cache layout and link targets.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::asset::TranscodeOptions;

/// File name searched for in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "localize.config.json";

/// Discoverable project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// HTML documents to process, relative to the project root, in order.
  pub documents: Vec<String>,
  /// Directory holding cached assets; also the prefix written into markup.
  pub assets_dir: String,
  /// Widest allowed asset, in pixels.
  pub max_width: u32,
  /// Lossy WebP quality, 0-100.
  pub quality: u8,
  /// Per request timeout, in seconds.
  pub request_timeout_secs: u64,
  /// User agent sent with every download.
  pub user_agent: String,
  /// Destination every recognised contact link is rewritten to.
  pub link_target: String,
  /// Hosts whose `href` links are rewritten.
  pub link_hosts: Vec<String>,
  /// URL prefixes that are never downloaded, such as tracking pixels.
  pub exclude_urls: Vec<String>,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      documents: vec!["model1.html".into(), "model2.html".into(), "model3.html".into()],
      assets_dir: "assets/img".into(),
      max_width: 1920,
      quality: 80,
      request_timeout_secs: 10,
      user_agent: "Mozilla/5.0".into(),
      link_target: "https://wa.link/1nxmx6".into(),
      link_hosts: vec!["wa.me".into(), "api.whatsapp.com".into()],
      exclude_urls: Vec::new(),
    }
  }
}

impl ProjectConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall back to default
  /// values so a bare project directory still works.
  pub fn discover(root: &Path) -> Self {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Read configuration from a file the user asked for explicitly.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read config at {}", path.display()))?;
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse config at {}", path.display()))
  }

  /// Document paths resolved against the project root.
  pub fn document_paths(&self, root: &Path) -> Vec<PathBuf> {
    self.documents.iter().map(|document| root.join(document)).collect()
  }

  /// Output constraints for transcoded assets.
  pub fn transcode_options(&self) -> TranscodeOptions {
    TranscodeOptions {
      max_width: self.max_width.max(1),
      quality: self.quality.min(100),
    }
  }

  /// Timeout applied to each download.
  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_match_the_stock_site() {
    let config = ProjectConfig::default();
    assert_eq!(config.assets_dir, "assets/img");
    assert_eq!(config.max_width, 1920);
    assert_eq!(config.quality, 80);
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.link_hosts, vec!["wa.me".to_string(), "api.whatsapp.com".to_string()]);
  }

  #[test]
  fn discover_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    assert_eq!(ProjectConfig::discover(temp.path()), ProjectConfig::default());

    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
    assert_eq!(ProjectConfig::discover(temp.path()), ProjectConfig::default());
  }

  #[test]
  fn partial_files_keep_remaining_defaults() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{"documents": ["index.html"], "quality": 60, "exclude_urls": ["https://pixel.test/"]}"#,
    )
    .unwrap();

    let config = ProjectConfig::discover(temp.path());
    assert_eq!(config.documents, vec!["index.html".to_string()]);
    assert_eq!(config.quality, 60);
    assert_eq!(config.max_width, 1920);
    assert_eq!(config.exclude_urls, vec!["https://pixel.test/".to_string()]);
    assert_eq!(config.document_paths(temp.path()), vec![temp.path().join("index.html")]);
  }

  #[test]
  fn explicit_load_reports_parse_errors() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("custom.json");
    fs::write(&path, r#"{"quality": "high"}"#).unwrap();

    let err = ProjectConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
    assert!(ProjectConfig::load(&temp.path().join("absent.json")).is_err());
  }

  #[test]
  fn clamps_transcode_options() {
    let config = ProjectConfig {
      max_width: 0,
      quality: 250,
      ..ProjectConfig::default()
    };
    let options = config.transcode_options();
    assert_eq!(options.max_width, 1);
    assert_eq!(options.quality, 100);
  }
}
