//! The narrow syntactic contexts in which a URL is eligible for rewriting.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ExternalReference, ReferenceContext};

/// A compiled pattern whose first capture group is the URL to rewrite.
#[derive(Debug, Clone)]
pub struct Envelope {
  context: ReferenceContext,
  pattern: Regex,
}

impl Envelope {
  /// `src="https://…"` or `src='https://…'`.
  pub fn attribute_src() -> &'static Envelope {
    static ENVELOPE: OnceLock<Envelope> = OnceLock::new();
    ENVELOPE.get_or_init(|| Envelope {
      context: ReferenceContext::AttributeSrc,
      pattern: Regex::new(r#"src=["'](https?://[^"']+)["']"#).expect("invalid src attribute regex"),
    })
  }

  /// `url(https://…)` with optional single or double quotes around the URL.
  pub fn style_url() -> &'static Envelope {
    static ENVELOPE: OnceLock<Envelope> = OnceLock::new();
    ENVELOPE.get_or_init(|| Envelope {
      context: ReferenceContext::StyleUrlFunction,
      pattern: Regex::new(r#"url\(['"]?(https?://[^'")]+)['"]?\)"#).expect("invalid css url regex"),
    })
  }

  /// `href="https://<host>/…"` restricted to the given hosts.
  ///
  /// Returns `None` when no usable host is configured.
  pub fn contact_href<S: AsRef<str>>(hosts: &[S]) -> Option<Envelope> {
    let hosts: BTreeSet<&str> = hosts
      .iter()
      .map(|host| host.as_ref().trim())
      .filter(|host| !host.is_empty())
      .collect();
    if hosts.is_empty() {
      return None;
    }

    let alternatives = hosts
      .iter()
      .map(|host| regex::escape(host))
      .collect::<Vec<_>>()
      .join("|");
    let pattern = Regex::new(&format!(r#"href=["'](https?://(?:{alternatives})/[^"']+)["']"#))
      .expect("invalid contact link regex");

    Some(Envelope {
      context: ReferenceContext::ContactHref,
      pattern,
    })
  }

  /// Which syntactic context this envelope recognises.
  pub fn context(&self) -> ReferenceContext {
    self.context
  }

  pub(crate) fn pattern(&self) -> &Regex {
    &self.pattern
  }

  /// Every reference inside this envelope, in document order.
  pub fn references<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ExternalReference> + 'a {
    self.pattern.captures_iter(text).filter_map(move |caps| {
      caps.get(1).map(|url| ExternalReference {
        raw_url: url.as_str().to_string(),
        context: self.context,
      })
    })
  }
}

/// Envelopes scanned by the image localizer.
pub fn image_envelopes() -> [&'static Envelope; 2] {
  [Envelope::attribute_src(), Envelope::style_url()]
}
