//! Whole-file reads and writes for HTML documents and cached assets.

use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reasons a document cannot be loaded.
#[derive(Debug, Error)]
pub enum DocumentError {
  /// No file exists at the configured path.
  #[error("file not found: {}", .0.display())]
  Missing(PathBuf),
  /// The file exists but could not be read as UTF-8 text.
  #[error("failed to read {}: {source}", path.display())]
  Read {
    /// Path of the document.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
  /// The rewritten text could not be stored.
  #[error("failed to write {}: {source}", path.display())]
  Write {
    /// Path of the document.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
}

/// An HTML document held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  /// Location of the document on disk.
  pub path: PathBuf,
  /// Full document text.
  pub text: String,
}

impl Document {
  /// Read the whole document at `path`.
  pub fn load(path: &Path) -> Result<Self, DocumentError> {
    match fs::read_to_string(path) {
      Ok(text) => Ok(Self {
        path: path.to_path_buf(),
        text,
      }),
      Err(err) if err.kind() == ErrorKind::NotFound => Err(DocumentError::Missing(path.to_path_buf())),
      Err(source) => Err(DocumentError::Read {
        path: path.to_path_buf(),
        source,
      }),
    }
  }

  /// Overwrite the file on disk with the current text.
  pub fn save(&self) -> Result<(), DocumentError> {
    write_atomic(&self.path, self.text.as_bytes()).map_err(|source| DocumentError::Write {
      path: self.path.clone(),
      source,
    })
  }
}

/// Replace `path` with `contents` by writing a sibling temporary file and renaming it.
///
/// Missing parent directories are created first. An existing file keeps its permissions, and
/// a symlinked `path` is written through to the file it points at rather than replaced.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
  let target = follow_symlink(path)?;
  if let Some(parent) = target.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)?;
  }

  let temp = temp_sibling(&target);
  fs::write(&temp, contents)?;
  let installed = match fs::metadata(&target) {
    Ok(existing) => fs::set_permissions(&temp, existing.permissions()),
    Err(_) => Ok(()),
  }
  .and_then(|()| fs::rename(&temp, &target));
  if let Err(err) = installed {
    let _ = fs::remove_file(&temp);
    return Err(err);
  }
  Ok(())
}

fn follow_symlink(path: &Path) -> io::Result<PathBuf> {
  match fs::symlink_metadata(path) {
    Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path),
    _ => Ok(path.to_path_buf()),
  }
}

fn temp_sibling(path: &Path) -> PathBuf {
  let mut name = path
    .file_name()
    .map(OsString::from)
    .unwrap_or_else(|| OsString::from("document"));
  name.push(".tmp");
  path.with_file_name(name)
}
