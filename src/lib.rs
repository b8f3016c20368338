#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset;
pub mod asset_paths;
pub mod config;
pub mod document;
pub mod models;
pub mod passes;
pub mod pipeline;
pub mod rewrite;
pub mod selection;

pub use asset::{AssetError, AssetLocalizer, Fetch, HttpFetcher, TranscodeOptions};
pub use asset_paths::ContentCache;
pub use config::ProjectConfig;
pub use models::{DocumentReport, RunReport};
pub use passes::LinkNormalizer;
pub use pipeline::{Mode, Pipeline};
pub use selection::{UrlInclusion, UrlSelection};
