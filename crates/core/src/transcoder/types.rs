//! Types for the transcoder module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::TranscoderError;

/// A validated time range to restrict a clip to, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    start_secs: f64,
    end_secs: Option<f64>,
}

impl ClipRange {
    /// Creates a range after validating `start ≥ 0` and `end > start`.
    pub fn new(start_secs: f64, end_secs: Option<f64>) -> Result<Self, TranscoderError> {
        if !start_secs.is_finite() || start_secs < 0.0 {
            return Err(TranscoderError::InvalidClipRange {
                start_secs,
                end_secs,
            });
        }
        if let Some(end) = end_secs {
            if !end.is_finite() || end <= start_secs {
                return Err(TranscoderError::InvalidClipRange {
                    start_secs,
                    end_secs,
                });
            }
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    /// Builds a range from raw work-item offsets.
    ///
    /// Returns `None` when no trimming is requested (zero start, open end),
    /// and an error for inverted or negative offsets, before any I/O happens.
    pub fn from_offsets(
        start_secs: f64,
        end_secs: Option<f64>,
    ) -> Result<Option<Self>, TranscoderError> {
        if start_secs == 0.0 && end_secs.is_none() {
            return Ok(None);
        }
        Self::new(start_secs, end_secs).map(Some)
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn end_secs(&self) -> Option<f64> {
        self.end_secs
    }
}

/// Output sample depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleDepth {
    /// 16 bits per sample.
    S16,
    /// 24 bits per sample.
    S24,
    /// 32 bits per sample.
    S32,
}

impl SampleDepth {
    /// Builds a depth from a bytes-per-sample count.
    pub fn from_bytes(nbytes: u8) -> Option<Self> {
        match nbytes {
            2 => Some(Self::S16),
            3 => Some(Self::S24),
            4 => Some(Self::S32),
            _ => None,
        }
    }

    /// Returns the ffmpeg PCM codec for this depth, for PCM containers.
    pub fn pcm_codec(&self) -> &'static str {
        match self {
            Self::S16 => "pcm_s16le",
            Self::S24 => "pcm_s24le",
            Self::S32 => "pcm_s32le",
        }
    }

    /// Returns the ffmpeg sample format for non-PCM containers. 24-bit
    /// samples are carried in s32; there is no packed s24 sample format.
    pub fn sample_fmt(&self) -> &'static str {
        match self {
            Self::S16 => "s16",
            Self::S24 | Self::S32 => "s32",
        }
    }
}

/// Target encoding parameters. Every field defaults to "pass through the
/// source value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodeParams {
    /// Target sample rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate_hz: Option<u32>,

    /// Target sample depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_depth: Option<SampleDepth>,

    /// Downmix to a single channel.
    #[serde(default)]
    pub mono: bool,

    /// Maximum width (height scaled proportionally).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,

    /// Maximum height (width scaled proportionally).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,

    /// Target frame rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f32>,
}

/// A transcode job request.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    /// Source media file.
    pub input_path: PathBuf,
    /// Destination file; the container is inferred from its extension.
    pub output_path: PathBuf,
    /// Optional trim applied before encoding.
    pub clip: Option<ClipRange>,
    /// Target encoding parameters.
    pub params: EncodeParams,
}

/// Result of a successful transcode.
#[derive(Debug, Clone)]
pub struct TranscodeOutcome {
    /// Destination file path.
    pub output_path: PathBuf,
    /// Destination file size in bytes.
    pub output_size_bytes: u64,
    /// Wall-clock transcode duration in milliseconds.
    pub duration_ms: u64,
}

/// Information about a media file, as reported by the probe tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// File path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Container format (e.g. "wav", "mp4").
    pub container: String,
    /// First audio stream, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioStreamInfo>,
    /// First video stream, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoStreamInfo>,
}

/// Parameters of an audio stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioStreamInfo {
    pub codec: Option<String>,
    pub sample_rate_hz: Option<u32>,
    pub channels: Option<u8>,
    pub bitrate_kbps: Option<u32>,
}

/// Parameters of a video stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStreamInfo {
    pub codec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f32>,
}
