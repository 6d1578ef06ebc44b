//! Configuration for the fetcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the yt-dlp based fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Path to the yt-dlp binary.
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    /// Suppress the tool's informational output. Failures are still captured
    /// and reported either way.
    #[serde(default = "default_quiet")]
    pub quiet: bool,

    /// Optional timeout for a single fetch, in seconds. Absent means a hung
    /// fetch occupies its worker until the tool exits.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Additional arguments appended to every invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_quiet() -> bool {
    true
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            quiet: default_quiet(),
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
        let config = FetcherConfig::default();
        assert_eq!(config.ytdlp_path, PathBuf::from("yt-dlp"));
        assert!(config.quiet);
        assert!(config.timeout_secs.is_none());
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn deserialize_partial() {
        let toml = r#"
            quiet = false
            timeout_secs = 120
        "#;
        let config: FetcherConfig = toml::from_str(toml).unwrap();
        assert!(!config.quiet);
        assert_eq!(config.timeout_secs, Some(120));
        assert_eq!(config.ytdlp_path, PathBuf::from("yt-dlp"));
    }
}
