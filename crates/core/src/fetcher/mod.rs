//! Fetcher module for acquiring remote media.
//!
//! Provides the [`MediaFetcher`] capability trait and a yt-dlp backed
//! implementation. A fetch deposits exactly one file into an explicitly
//! supplied working directory and reports its path; working-directory and
//! output-noise concerns are per-request configuration, never ambient
//! process state.

mod config;
mod error;
mod traits;
mod types;
mod ytdlp;

pub use config::FetcherConfig;
pub use error::FetcherError;
pub use traits::MediaFetcher;
pub use types::{FetchRequest, FetchedMedia, MediaKind};
pub use ytdlp::YtdlpFetcher;
