use std::path::{Path, PathBuf};

use super::digest::url_digest;

/// File extension of every transcoded asset stored in the cache.
pub const ASSET_EXTENSION: &str = "webp";

/// Permanent, content-addressed mapping from external URLs to local asset files.
///
/// The assets directory itself is the index: a file at the derived path is a cache hit and
/// is trusted as-is. Entries are never rewritten or evicted.
#[derive(Debug, Clone)]
pub struct ContentCache {
  root: PathBuf,
  assets_dir: String,
}

impl ContentCache {
  /// Create a cache rooted at `root` that stores assets under `assets_dir`.
  ///
  /// `assets_dir` is kept relative so it can double as the prefix written into markup.
  pub fn new(root: impl Into<PathBuf>, assets_dir: &str) -> Self {
    let assets_dir = assets_dir.replace('\\', "/").trim_end_matches('/').to_string();
    Self {
      root: root.into(),
      assets_dir,
    }
  }

  /// Directory on disk that holds the cached assets.
  pub fn assets_dir(&self) -> PathBuf {
    self.root.join(&self.assets_dir)
  }

  /// Cache file name for a URL, `<md5hex>.webp`.
  pub fn file_name(url: &str) -> String {
    format!("{}.{}", url_digest(url), ASSET_EXTENSION)
  }

  /// Derive the on-disk location for a URL without touching the filesystem.
  pub fn resolve_path(&self, url: &str) -> PathBuf {
    self.assets_dir().join(Self::file_name(url))
  }

  /// Whether a cached asset already exists at `path`.
  pub fn has_entry(&self, path: &Path) -> bool {
    path.is_file()
  }

  /// Path written into the rewritten markup, always with forward slashes.
  pub fn reference_for(&self, url: &str) -> String {
    if self.assets_dir.is_empty() {
      Self::file_name(url)
    } else {
      format!("{}/{}", self.assets_dir, Self::file_name(url))
    }
  }
}
