//! Content-addressed naming and lookup for localized assets.
//!
//! Cache keys are derived purely from the source URL, so the assets directory can be shared
//! between documents and between runs without any index file.

mod cache;
mod digest;

pub use cache::{ASSET_EXTENSION, ContentCache};
pub use digest::url_digest;
