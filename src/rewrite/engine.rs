//! Two-phase discover-then-substitute rewriting over raw markup.

use std::collections::{BTreeMap, BTreeSet};

use super::envelopes::Envelope;
use crate::models::ReferenceContext;

/// Original URL to replacement string, decided before any text is touched.
pub type ReplacementMap = BTreeMap<String, String>;

/// Result of rewriting one envelope across a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
  /// Rewritten text.
  pub text: String,
  /// Number of sites whose URL was replaced.
  pub count: usize,
}

/// Collect the distinct URLs matched by any of `envelopes`.
pub fn discover(text: &str, envelopes: &[&Envelope]) -> BTreeSet<String> {
  envelopes
    .iter()
    .flat_map(|envelope| envelope.references(text))
    .map(|reference| reference.raw_url)
    .collect()
}

/// Swap the URL of every `envelope` match found in `replacements`.
///
/// Only the captured URL span changes; the attribute name, quotes and surrounding markup are
/// copied through untouched. Contact links are the exception: their closing quote is rewritten
/// to match the opening one, so `href="…'` comes out balanced. Matches without a map entry are
/// left exactly as they were.
pub fn substitute(text: &str, envelope: &Envelope, replacements: &ReplacementMap) -> Substitution {
  let balance_quotes = envelope.context() == ReferenceContext::ContactHref;
  let mut output = String::with_capacity(text.len());
  let mut cursor = 0;
  let mut count = 0;

  for caps in envelope.pattern().captures_iter(text) {
    let (Some(site), Some(url)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    let Some(replacement) = replacements.get(url.as_str()) else {
      continue;
    };

    output.push_str(&text[cursor..url.start()]);
    output.push_str(replacement);
    cursor = url.end();
    if balance_quotes {
      // Quotes are ASCII, so the byte before the URL is the whole opening quote.
      output.push_str(&text[url.start() - 1..url.start()]);
      cursor = site.end();
    }
    count += 1;
  }

  output.push_str(&text[cursor..]);
  Substitution { text: output, count }
}

/// Apply [`substitute`] for each envelope in turn, summing the replacement counts.
pub fn substitute_all(
  text: &str,
  envelopes: &[&Envelope],
  replacements: &ReplacementMap,
) -> Substitution {
  envelopes.iter().fold(
    Substitution {
      text: text.to_string(),
      count: 0,
    },
    |acc, envelope| {
      let next = substitute(&acc.text, envelope, replacements);
      Substitution {
        text: next.text,
        count: acc.count + next.count,
      }
    },
  )
}
