/// Compute the cache key for an external URL.
///
/// The key is the lowercase hexadecimal MD5 digest of the URL's UTF-8 bytes, so the same
/// literal URL always maps to the same asset file across documents and across runs.
pub fn url_digest(url: &str) -> String {
  format!("{:x}", md5::compute(url.as_bytes()))
}

#[cfg(test)]
mod tests {
  use super::url_digest;

  #[test]
  fn matches_known_md5_vectors() {
    assert_eq!(url_digest(""), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(url_digest("abc"), "900150983cd24fb0d6963f7d28e17f72");
  }

  #[test]
  fn is_stable_and_fixed_length() {
    let first = url_digest("https://example.com/a.jpg");
    let second = url_digest("https://example.com/a.jpg");
    assert_eq!(first, second);
    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn distinguishes_similar_urls() {
    assert_ne!(
      url_digest("https://example.com/a.jpg"),
      url_digest("https://example.com/a.jpg?w=1")
    );
  }
}
