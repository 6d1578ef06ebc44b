//! Types for the fetcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which streams of the remote resource to acquire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Best available audio-only stream.
    Audio,
    /// Best available video-only stream.
    Video,
    /// Best available combined stream.
    Both,
}

impl MediaKind {
    /// Returns the yt-dlp format selector for this kind.
    pub fn format_selector(&self) -> &'static str {
        match self {
            Self::Audio => "bestaudio",
            Self::Video => "bestvideo",
            Self::Both => "best",
        }
    }
}

/// A single fetch request handed to a [`MediaFetcher`](super::MediaFetcher).
///
/// The working directory is an explicit parameter so that concurrent fetches
/// never share ambient process state.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Canonical URL of the remote resource.
    pub url: String,
    /// Which streams to acquire.
    pub kind: MediaKind,
    /// Directory the fetched artifact must be deposited in.
    pub work_dir: PathBuf,
}

/// The artifact a fetch deposited on disk.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    /// Path of the deposited file, inside the request's working directory.
    pub path: PathBuf,
    /// Size of the deposited file in bytes.
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_selector_per_kind() {
        assert_eq!(MediaKind::Audio.format_selector(), "bestaudio");
        assert_eq!(MediaKind::Video.format_selector(), "bestvideo");
        assert_eq!(MediaKind::Both.format_selector(), "best");
    }

    #[test]
    fn media_kind_serde_snake_case() {
        let kind: MediaKind = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(kind, MediaKind::Audio);
        assert_eq!(serde_json::to_string(&MediaKind::Both).unwrap(), "\"both\"");
    }
}
