//! Clip acquisition pipeline.
//!
//! [`ClipFetcher`] composes a [`MediaFetcher`](crate::fetcher::MediaFetcher)
//! and a [`Transcoder`](crate::transcoder::Transcoder) into the two
//! operations this crate exists for:
//!
//! - [`ClipFetcher::fetch_one`]: acquire one clip into a scratch directory,
//!   trim/transcode it into the destination directory, clean up, and report
//!   the output path (or `None` on any contained failure).
//! - [`ClipFetcher::fetch_many`]: map a list of [`WorkItem`]s to their
//!   results, sequentially or through a fixed-size worker pool, with
//!   per-item failure isolation.

mod batch;
mod single;
mod types;

pub use batch::BatchOptions;
pub use single::{ClipFetcher, FetchError};
pub use types::{resource_url, FetchPlan, OutputNaming, WorkItem};
