//! Configuration for the transcoder module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the FFmpeg-based transcoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the ffprobe binary.
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: PathBuf,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose,
    /// debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional timeout for a single transcode, in seconds. Absent means a
    /// hung transcode occupies its worker until the tool exits.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Additional arguments appended before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

fn default_log_level() -> String {
    "warning".to_string()
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            log_level: default_log_level(),
            timeout_secs: None,
            extra_args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TranscoderConfig::default();
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.ffprobe_path, PathBuf::from("ffprobe"));
        assert_eq!(config.log_level, "warning");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn deserialize_partial() {
        let toml = r#"
            ffmpeg_path = "/usr/local/bin/ffmpeg"
            timeout_secs = 600
        "#;
        let config: TranscoderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.ffmpeg_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.timeout_secs, Some(600));
        assert_eq!(config.log_level, "warning");
    }
}
