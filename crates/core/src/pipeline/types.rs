//! Types for the pipeline module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fetcher::MediaKind;
use crate::transcoder::EncodeParams;

/// One unit of work: a remote identifier plus the time range to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Token identifying the remote resource.
    pub id: String,
    /// Offset of the first second to keep.
    #[serde(default)]
    pub start_secs: f64,
    /// Offset of the first second to drop; absent means "to the end".
    #[serde(default)]
    pub end_secs: Option<f64>,
}

impl WorkItem {
    /// Creates a work item for a `[start, end)` range.
    pub fn new(id: impl Into<String>, start_secs: f64, end_secs: Option<f64>) -> Self {
        Self {
            id: id.into(),
            start_secs,
            end_secs,
        }
    }

    /// Creates a work item covering the whole clip.
    pub fn whole(id: impl Into<String>) -> Self {
        Self::new(id, 0.0, None)
    }
}

/// How output files are named and where they are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputNaming {
    /// Destination directory, created on demand.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Filename prefix; empty means no prefix segment.
    #[serde(default)]
    pub prefix: String,
    /// Filename suffix (extension, without the dot).
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_suffix() -> String {
    "wav".to_string()
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            prefix: String::new(),
            suffix: default_suffix(),
        }
    }
}

impl OutputNaming {
    /// Returns `{prefix}.{id}.{suffix}`, or `{id}.{suffix}` when the prefix
    /// is empty.
    pub fn file_name(&self, id: &str) -> String {
        if self.prefix.is_empty() {
            format!("{}.{}", id, self.suffix)
        } else {
            format!("{}.{}.{}", self.prefix, id, self.suffix)
        }
    }
}

/// Everything a [`ClipFetcher`](super::ClipFetcher) needs besides its two
/// capabilities: which streams to acquire, how to encode them, and where the
/// results go.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// Which streams of each resource to acquire.
    pub kind: MediaKind,
    /// Target encoding parameters.
    pub encode: EncodeParams,
    /// Output directory and filename scheme.
    pub naming: OutputNaming,
    /// Parent directory for per-item scratch directories; defaults to the
    /// system temp directory.
    pub work_root: Option<PathBuf>,
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            kind: MediaKind::Audio,
            encode: EncodeParams::default(),
            naming: OutputNaming::default(),
            work_root: None,
        }
    }
}

/// Builds the canonical URL for a resource identifier.
pub fn resource_url(id: &str) -> String {
    format!("https://youtu.be/{}", urlencoding::encode(id))
}
