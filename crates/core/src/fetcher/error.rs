//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching remote media.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// Fetch binary not found.
    #[error("fetch tool not found at path: {path}")]
    ToolNotFound { path: PathBuf },

    /// The fetch tool exited with a failure status.
    #[error("fetch failed for {url}: {reason}")]
    FetchFailed {
        url: String,
        reason: String,
        stderr: Option<String>,
    },

    /// The fetch reported success but no artifact was deposited.
    #[error("fetch produced no artifact in {dir}")]
    NoArtifact { dir: PathBuf },

    /// More than one file appeared in the working directory.
    #[error("fetch produced {count} artifacts in {dir}, expected exactly one")]
    AmbiguousArtifact { dir: PathBuf, count: usize },

    /// Fetch exceeded the configured timeout.
    #[error("fetch timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while spawning or reading from the tool.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetcherError {
    /// Creates a fetch-failed error, trimming the stderr capture to its tail.
    pub fn fetch_failed(url: impl Into<String>, reason: impl Into<String>, stderr: String) -> Self {
        let stderr = stderr.trim();
        Self::FetchFailed {
            url: url.into(),
            reason: reason.into(),
            stderr: if stderr.is_empty() {
                None
            } else {
                Some(tail_lines(stderr, 8))
            },
        }
    }
}

/// Keeps at most the last `n` lines of a tool's stderr capture.
fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failed_drops_empty_stderr() {
        let err = FetcherError::fetch_failed("https://x", "exit 1", "   ".to_string());
        match err {
            FetcherError::FetchFailed { stderr, .. } => assert!(stderr.is_none()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fetch_failed_keeps_stderr_tail() {
        let capture = (0..20).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let err = FetcherError::fetch_failed("https://x", "exit 1", capture);
        match err {
            FetcherError::FetchFailed { stderr: Some(s), .. } => {
                assert!(s.starts_with("line12"));
                assert!(s.ends_with("line19"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
