//! Clip acquisition library.
//!
//! Fetches remote audio/video clips through an external fetch tool, trims
//! and transcodes them through an external transcode tool, and writes one
//! output file per work item into a destination directory. Batches run
//! through a fixed-size worker pool with per-item failure isolation: a
//! failed item maps to an absent result and never aborts its batch.

pub mod config;
pub mod fetcher;
pub mod pipeline;
pub mod testing;
pub mod transcoder;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use fetcher::{
    FetchRequest, FetchedMedia, FetcherConfig, FetcherError, MediaFetcher, MediaKind, YtdlpFetcher,
};
pub use pipeline::{
    resource_url, BatchOptions, ClipFetcher, FetchError, FetchPlan, OutputNaming, WorkItem,
};
pub use transcoder::{
    ClipRange, EncodeParams, FfmpegTranscoder, MediaInfo, SampleDepth, TranscodeJob,
    TranscodeOutcome, Transcoder, TranscoderConfig, TranscoderError,
};
