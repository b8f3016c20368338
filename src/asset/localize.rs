//! Cache-aware download and transcode of a single external image.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use super::fetch::{Fetch, FetchError};
use super::transcode::{TranscodeError, TranscodeOptions, transcode};
use crate::asset_paths::ContentCache;
use crate::document::write_atomic;

/// Reason a single URL could not be localized.
#[derive(Debug, Error)]
pub enum AssetError {
  /// Download failed or returned a non-success status.
  #[error(transparent)]
  Fetch(#[from] FetchError),
  /// The payload could not be decoded or re-encoded.
  #[error(transparent)]
  Transcode(#[from] TranscodeError),
  /// The transcoded bytes could not be stored in the cache.
  #[error("failed to write {}: {source}", path.display())]
  Write {
    /// Cache path that was being written.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
}

/// Where a localized asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
  /// Already present in the cache, no network access happened.
  Cached,
  /// Downloaded and transcoded during this call.
  Downloaded,
}

/// A URL that now has a local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedAsset {
  /// Replacement written into markup.
  pub reference: String,
  /// Location of the file on disk.
  pub path: PathBuf,
  /// Whether the file was reused or freshly produced.
  pub origin: AssetOrigin,
}

/// Turns external image URLs into cached local WebP files.
///
/// Each call is isolated: a failure is returned as [`AssetError`] for that URL only and
/// leaves the cache untouched.
#[derive(Debug)]
pub struct AssetLocalizer<F> {
  cache: ContentCache,
  fetcher: F,
  options: TranscodeOptions,
}

impl<F: Fetch> AssetLocalizer<F> {
  /// Create a localizer storing assets in `cache`.
  pub fn new(cache: ContentCache, fetcher: F, options: TranscodeOptions) -> Self {
    Self {
      cache,
      fetcher,
      options,
    }
  }

  /// Cache the localizer writes to.
  pub fn cache(&self) -> &ContentCache {
    &self.cache
  }

  /// Resolve `url` to a local asset, downloading and transcoding it on a cache miss.
  pub fn localize(&self, url: &str) -> Result<LocalizedAsset, AssetError> {
    let path = self.cache.resolve_path(url);
    let reference = self.cache.reference_for(url);

    if self.cache.has_entry(&path) {
      debug!(url, path = %path.display(), "cache hit");
      return Ok(LocalizedAsset {
        reference,
        path,
        origin: AssetOrigin::Cached,
      });
    }

    info!(url, "downloading");
    let bytes = self.fetcher.fetch(url)?;
    let encoded = transcode(&bytes, &self.options)?;

    write_atomic(&path, &encoded).map_err(|source| AssetError::Write {
      path: path.clone(),
      source,
    })?;
    info!(path = %path.display(), bytes = encoded.len(), "saved");

    Ok(LocalizedAsset {
      reference,
      path,
      origin: AssetOrigin::Downloaded,
    })
  }
}
