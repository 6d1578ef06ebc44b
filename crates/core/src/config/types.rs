use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fetcher::{FetcherConfig, MediaKind};
use crate::pipeline::{BatchOptions, FetchPlan, OutputNaming};
use crate::transcoder::{EncodeParams, TranscoderConfig};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Which streams to acquire for every item.
    #[serde(default = "default_kind")]
    pub kind: MediaKind,

    /// Output directory and filename scheme.
    #[serde(default)]
    pub output: OutputNaming,

    /// Target encoding parameters.
    #[serde(default)]
    pub encode: EncodeParams,

    /// Fetch tool settings.
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Transcode tool settings.
    #[serde(default)]
    pub transcoder: TranscoderConfig,

    /// Batch execution settings.
    #[serde(default)]
    pub batch: BatchOptions,

    /// Parent directory for per-item scratch directories; absent means the
    /// system temp directory.
    #[serde(default)]
    pub work_root: Option<PathBuf>,
}

fn default_kind() -> MediaKind {
    MediaKind::Audio
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            output: OutputNaming::default(),
            encode: EncodeParams::default(),
            fetcher: FetcherConfig::default(),
            transcoder: TranscoderConfig::default(),
            batch: BatchOptions::default(),
            work_root: None,
        }
    }
}

impl Config {
    /// Builds the fetch plan this configuration describes.
    pub fn plan(&self) -> FetchPlan {
        FetchPlan {
            kind: self.kind,
            encode: self.encode.clone(),
            naming: self.output.clone(),
            work_root: self.work_root.clone(),
        }
    }
}
