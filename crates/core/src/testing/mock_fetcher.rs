//! Mock fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::fetcher::{FetchRequest, FetchedMedia, FetcherError, MediaFetcher};

/// Mock implementation of the [`MediaFetcher`] trait.
///
/// Deposits a configurable fixture file into the request's working directory
/// and records every request for assertions. Failures are injected by URL
/// substring, so a test can make exactly the items it names fail.
///
/// Clones share state, letting a test keep a handle after moving the mock
/// into a `ClipFetcher`.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    requests: Arc<RwLock<Vec<FetchRequest>>>,
    fail_substrings: Arc<RwLock<Vec<String>>>,
    artifact_ext: Arc<RwLock<String>>,
    artifact_bytes: Arc<RwLock<Vec<u8>>>,
    delay: Arc<RwLock<Duration>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a new mock fetcher depositing a small m4a-named fixture.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            fail_substrings: Arc::new(RwLock::new(Vec::new())),
            artifact_ext: Arc::new(RwLock::new("m4a".to_string())),
            artifact_bytes: Arc::new(RwLock::new(b"mock media payload".to_vec())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<FetchRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of fetches attempted.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Make every fetch whose URL contains `fragment` fail.
    pub async fn fail_for(&self, fragment: impl Into<String>) {
        self.fail_substrings.write().await.push(fragment.into());
    }

    /// Set the bytes and extension of the deposited fixture.
    pub async fn set_artifact(&self, bytes: Vec<u8>, ext: impl Into<String>) {
        *self.artifact_bytes.write().await = bytes;
        *self.artifact_ext.write().await = ext.into();
    }

    /// Add an artificial delay to every fetch.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedMedia, FetcherError> {
        self.requests.write().await.push(request.clone());

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .fail_substrings
            .read()
            .await
            .iter()
            .any(|fragment| request.url.contains(fragment));
        if failing {
            return Err(FetcherError::fetch_failed(
                &request.url,
                "mock fetch failure",
                String::new(),
            ));
        }

        let ext = self.artifact_ext.read().await.clone();
        let bytes = self.artifact_bytes.read().await.clone();
        let path = request.work_dir.join(format!("fetched.{ext}"));
        tokio::fs::write(&path, &bytes).await?;

        Ok(FetchedMedia {
            path,
            size_bytes: bytes.len() as u64,
        })
    }

    async fn validate(&self) -> Result<(), FetcherError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MediaKind;

    fn request(dir: &std::path::Path, url: &str) -> FetchRequest {
        FetchRequest {
            url: url.to_string(),
            kind: MediaKind::Audio,
            work_dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn deposits_fixture_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::new();

        let media = fetcher
            .fetch(&request(dir.path(), "https://youtu.be/ok"))
            .await
            .unwrap();

        assert!(media.path.exists());
        assert_eq!(fetcher.request_count().await, 1);
    }

    #[tokio::test]
    async fn injected_failure_still_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::new();
        fetcher.fail_for("bad_id").await;

        let result = fetcher
            .fetch(&request(dir.path(), "https://youtu.be/bad_id"))
            .await;

        assert!(result.is_err());
        assert_eq!(fetcher.request_count().await, 1);
    }
}
