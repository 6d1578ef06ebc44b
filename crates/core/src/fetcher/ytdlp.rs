//! yt-dlp based fetcher implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::FetcherConfig;
use super::error::FetcherError;
use super::traits::MediaFetcher;
use super::types::{FetchRequest, FetchedMedia};

/// Fetcher implementation backed by the yt-dlp binary.
pub struct YtdlpFetcher {
    config: FetcherConfig,
}

impl YtdlpFetcher {
    /// Creates a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    /// Creates a fetcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FetcherConfig::default())
    }

    /// Builds the yt-dlp argument list for one request.
    ///
    /// The working directory is passed explicitly via `--paths`, and
    /// `--print after_move:filepath` makes the tool report the deposited
    /// file on stdout, so the caller never has to guess.
    fn build_args(&self, request: &FetchRequest) -> Vec<String> {
        let mut args = vec![
            "--no-playlist".to_string(),
            "-f".to_string(),
            request.kind.format_selector().to_string(),
            "--paths".to_string(),
            request.work_dir.to_string_lossy().to_string(),
            "--output".to_string(),
            "%(id)s.%(ext)s".to_string(),
            "--no-progress".to_string(),
            "--no-simulate".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
        ];

        if self.config.quiet {
            args.extend(["--quiet".to_string(), "--no-warnings".to_string()]);
        }

        args.extend(self.config.extra_args.iter().cloned());
        args.push(request.url.clone());

        args
    }

    fn map_spawn_error(&self, err: std::io::Error) -> FetcherError {
        if err.kind() == std::io::ErrorKind::NotFound {
            FetcherError::ToolNotFound {
                path: self.config.ytdlp_path.clone(),
            }
        } else {
            FetcherError::Io(err)
        }
    }
}

#[async_trait]
impl MediaFetcher for YtdlpFetcher {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedMedia, FetcherError> {
        let args = self.build_args(request);
        debug!(url = %request.url, "spawning yt-dlp");

        let child = Command::new(&self.config.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.map_spawn_error(e))?;

        let output = match self.config.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), child.wait_with_output())
                .await
                .map_err(|_| FetcherError::Timeout { timeout_secs: secs })??,
            None => child.wait_with_output().await?,
        };

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(FetcherError::fetch_failed(
                &request.url,
                format!("yt-dlp exited with code: {:?}", output.status.code()),
                stderr,
            ));
        }
        if !self.config.quiet && !stderr.trim().is_empty() {
            debug!(url = %request.url, "yt-dlp: {}", stderr.trim());
        }

        // The printed manifest is authoritative; the directory listing is the
        // fallback for tool versions that do not honor --print.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = match stdout.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(line) => PathBuf::from(line.trim()),
            None => locate_single_artifact(&request.work_dir).await?,
        };

        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|_| FetcherError::NoArtifact {
                dir: request.work_dir.clone(),
            })?;

        Ok(FetchedMedia {
            path,
            size_bytes: meta.len(),
        })
    }

    async fn validate(&self) -> Result<(), FetcherError> {
        let output = Command::new(&self.config.ytdlp_path)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.map_spawn_error(e))?;

        if !output.status.success() {
            return Err(FetcherError::fetch_failed(
                "",
                "yt-dlp --version failed",
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(())
    }
}

/// Lists the working directory and returns the single deposited file.
///
/// Zero files and more than one file are both explicit errors, never a
/// silent index into the listing.
pub(crate) async fn locate_single_artifact(dir: &Path) -> Result<PathBuf, FetcherError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }

    match files.len() {
        1 => Ok(files.remove(0)),
        0 => Err(FetcherError::NoArtifact {
            dir: dir.to_path_buf(),
        }),
        count => Err(FetcherError::AmbiguousArtifact {
            dir: dir.to_path_buf(),
            count,
        }),
    }
}
