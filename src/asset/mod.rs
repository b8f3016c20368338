//! Fetch/transcode unit: one external URL in, one cached WebP file out.

mod fetch;
mod localize;
#[cfg(test)]
pub(crate) mod testing;
mod transcode;

pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use localize::{AssetError, AssetLocalizer, AssetOrigin, LocalizedAsset};
pub use transcode::{TranscodeError, TranscodeOptions, target_dimensions, transcode};
