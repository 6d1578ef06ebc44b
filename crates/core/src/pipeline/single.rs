//! Single-item fetch orchestration.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::fetcher::{FetchRequest, FetcherError, MediaFetcher};
use crate::transcoder::{ClipRange, TranscodeJob, Transcoder, TranscoderError};

use super::types::{resource_url, FetchPlan, WorkItem};

/// Errors contained within a single item's fetch+convert run.
///
/// These never unwind to [`ClipFetcher::fetch_one`] callers; they are logged
/// and manifest as an absent result.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The work item's identifier is empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// Fetch capability error.
    #[error(transparent)]
    Fetch(#[from] FetcherError),

    /// Transcode capability error (including invalid clip ranges, detected
    /// before any I/O).
    #[error(transparent)]
    Transcode(#[from] TranscoderError),

    /// I/O error preparing directories.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches single clips and batches of clips.
///
/// Each item runs in its own scratch directory: acquire the raw media there,
/// transcode it into the destination directory, then drop the scratch
/// directory. Per-item failures are reported through `tracing` and surface
/// only as absent results, so one bad item never poisons a batch.
pub struct ClipFetcher<F, T> {
    fetcher: Arc<F>,
    transcoder: Arc<T>,
    plan: FetchPlan,
}

impl<F, T> Clone for ClipFetcher<F, T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            transcoder: Arc::clone(&self.transcoder),
            plan: self.plan.clone(),
        }
    }
}

impl<F, T> ClipFetcher<F, T>
where
    F: MediaFetcher,
    T: Transcoder,
{
    /// Creates a fetcher from its two capabilities and a plan.
    pub fn new(fetcher: F, transcoder: T, plan: FetchPlan) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            transcoder: Arc::new(transcoder),
            plan,
        }
    }

    /// Returns the plan this fetcher was built with.
    pub fn plan(&self) -> &FetchPlan {
        &self.plan
    }

    /// Fetches, trims and transcodes one clip.
    ///
    /// Returns the output path on success. On any failure the error is
    /// logged and the result is `None`; no partial output or scratch files
    /// remain either way.
    pub async fn fetch_one(&self, item: &WorkItem) -> Option<PathBuf> {
        match self.run_item(item).await {
            Ok(path) => {
                info!(id = %item.id, path = %path.display(), "clip ready");
                Some(path)
            }
            Err(error) => {
                warn!(id = %item.id, %error, "clip fetch failed");
                None
            }
        }
    }

    async fn run_item(&self, item: &WorkItem) -> Result<PathBuf, FetchError> {
        if item.id.is_empty() {
            return Err(FetchError::EmptyIdentifier);
        }
        // Caller errors are rejected before any I/O.
        let clip = ClipRange::from_offsets(item.start_secs, item.end_secs)?;

        tokio::fs::create_dir_all(&self.plan.naming.dir).await?;
        let work_dir = self.scoped_work_dir().await?;

        let request = FetchRequest {
            url: resource_url(&item.id),
            kind: self.plan.kind,
            work_dir: work_dir.path().to_path_buf(),
        };
        let media = self.fetcher.fetch(&request).await?;
        debug!(id = %item.id, artifact = %media.path.display(), size = media.size_bytes, "fetched");

        let output_path = self.plan.naming.dir.join(self.plan.naming.file_name(&item.id));
        self.transcoder
            .transcode(TranscodeJob {
                input_path: media.path,
                output_path: output_path.clone(),
                clip,
                params: self.plan.encode.clone(),
            })
            .await?;

        if let Err(error) = work_dir.close() {
            debug!(id = %item.id, %error, "scratch dir cleanup failed");
        }
        Ok(output_path)
    }

    /// Creates the per-item scratch directory, removed on drop on every exit
    /// path.
    async fn scoped_work_dir(&self) -> Result<TempDir, FetchError> {
        let dir = match &self.plan.work_root {
            Some(root) => {
                tokio::fs::create_dir_all(root).await?;
                tempfile::Builder::new().prefix("clipfetch-").tempdir_in(root)?
            }
            None => tempfile::Builder::new().prefix("clipfetch-").tempdir()?,
        };
        Ok(dir)
    }
}
