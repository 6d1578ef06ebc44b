//! Error types for the transcoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while trimming or transcoding media.
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// FFmpeg binary not found.
    #[error("ffmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// FFprobe binary not found.
    #[error("ffprobe not found at path: {path}")]
    FfprobeNotFound { path: PathBuf },

    /// Input file not found.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Output directory does not exist and could not be created.
    #[error("failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// Inverted or negative clip range.
    #[error("invalid clip range: start {start_secs}, end {end_secs:?}")]
    InvalidClipRange {
        start_secs: f64,
        end_secs: Option<f64>,
    },

    /// Transcode process failed.
    #[error("transcode failed: {reason}")]
    TranscodeFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Transcode exceeded the configured timeout.
    #[error("transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Failed to probe a media file.
    #[error("failed to probe media file: {reason}")]
    ProbeFailed { reason: String },

    /// Failed to parse probe output.
    #[error("failed to parse media info: {reason}")]
    ParseError { reason: String },

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscoderError {
    /// Creates a transcode-failed error, keeping the tail of the tool's
    /// stderr capture.
    pub fn transcode_failed(reason: impl Into<String>, stderr: String) -> Self {
        let stderr = stderr.trim();
        Self::TranscodeFailed {
            reason: reason.into(),
            stderr: if stderr.is_empty() {
                None
            } else {
                let lines: Vec<&str> = stderr.lines().collect();
                let start = lines.len().saturating_sub(8);
                Some(lines[start..].join("\n"))
            },
        }
    }

    /// Creates a probe-failed error.
    pub fn probe_failed(reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            reason: reason.into(),
        }
    }
}
