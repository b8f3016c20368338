//! Pattern-based URL discovery and surgical substitution shared by both passes.
//!
//! Markup is never parsed into a tree. Each envelope is a regular expression whose first
//! capture group is the URL; substitution splices replacements into exactly those spans so
//! every other byte of the document survives unchanged.

mod engine;
mod envelopes;

pub use engine::{ReplacementMap, Substitution, discover, substitute, substitute_all};
pub use envelopes::{Envelope, image_envelopes};
