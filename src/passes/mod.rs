//! The two document passes: image localization and contact link normalisation.

mod images;
mod links;

pub use images::localize_document;
pub use links::LinkNormalizer;
