//! Filters deciding which discovered image URLs are worth localizing.

use std::collections::BTreeSet;

/// Trait describing which external URLs may be downloaded.
pub trait UrlInclusion {
  /// Returns `true` when `url` should be localized.
  fn is_included(&self, url: &str) -> bool;
}

/// Prefix-based exclusion list, typically analytics pixels and tracking beacons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSelection {
  exclude: BTreeSet<String>,
}

impl UrlSelection {
  /// Build a selection excluding every URL that starts with one of `prefixes`.
  pub fn excluding(prefixes: impl IntoIterator<Item = String>) -> Self {
    Self {
      exclude: normalise_list(prefixes),
    }
  }

  /// Determine whether a URL should be localized.
  pub fn is_included(&self, url: &str) -> bool {
    !self.exclude.iter().any(|prefix| url.starts_with(prefix.as_str()))
  }
}

impl UrlInclusion for UrlSelection {
  fn is_included(&self, url: &str) -> bool {
    UrlSelection::is_included(self, url)
  }
}

/// Convert raw prefixes into a sorted, de-duplicated set without blank entries.
fn normalise_list(values: impl IntoIterator<Item = String>) -> BTreeSet<String> {
  values
    .into_iter()
    .map(|value| value.trim().to_string())
    .filter(|value| !value.is_empty())
    .collect()
}
