//! Transcoder module for trimming and re-encoding media files.
//!
//! Provides the [`Transcoder`] capability trait and an FFmpeg-backed
//! implementation. A job carries an optional `[start, end)` trim plus target
//! encoding parameters; every parameter defaults to passing the source value
//! through. [`Transcoder::probe`] inspects a file via ffprobe.

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::TranscoderConfig;
pub use error::TranscoderError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use types::{
    AudioStreamInfo, ClipRange, EncodeParams, MediaInfo, SampleDepth, TranscodeJob,
    TranscodeOutcome, VideoStreamInfo,
};
