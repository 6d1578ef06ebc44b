//! Mock transcoder for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transcoder::{
    AudioStreamInfo, MediaInfo, TranscodeJob, TranscodeOutcome, Transcoder, TranscoderError,
};

/// Mock implementation of the [`Transcoder`] trait.
///
/// Copies the input file to the output path so output-existence invariants
/// hold, and records every job for assertions. Failures are injected by
/// output-path substring. Clones share state.
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    jobs: Arc<RwLock<Vec<TranscodeJob>>>,
    fail_substrings: Arc<RwLock<Vec<String>>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(Vec::new())),
            fail_substrings: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get all recorded jobs.
    pub async fn recorded_jobs(&self) -> Vec<TranscodeJob> {
        self.jobs.read().await.clone()
    }

    /// Get the number of transcodes attempted.
    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Make every job whose output path contains `fragment` fail.
    pub async fn fail_for(&self, fragment: impl Into<String>) {
        self.fail_substrings.write().await.push(fragment.into());
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, TranscoderError> {
        Ok(MediaInfo {
            path: path.to_path_buf(),
            size_bytes: 1024,
            duration_secs: 180.0,
            container: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
            audio: Some(AudioStreamInfo {
                codec: Some("aac".to_string()),
                sample_rate_hz: Some(48000),
                channels: Some(2),
                bitrate_kbps: Some(128),
            }),
            video: None,
        })
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeOutcome, TranscoderError> {
        self.jobs.write().await.push(job.clone());

        let failing = self
            .fail_substrings
            .read()
            .await
            .iter()
            .any(|fragment| job.output_path.to_string_lossy().contains(fragment.as_str()));
        if failing {
            return Err(TranscoderError::transcode_failed(
                "mock transcode failure",
                String::new(),
            ));
        }

        if tokio::fs::metadata(&job.input_path).await.is_err() {
            return Err(TranscoderError::InputNotFound {
                path: job.input_path.clone(),
            });
        }
        if let Some(parent) = job.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = tokio::fs::copy(&job.input_path, &job.output_path).await?;

        Ok(TranscodeOutcome {
            output_path: job.output_path,
            output_size_bytes: bytes,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), TranscoderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcoder::EncodeParams;

    #[tokio::test]
    async fn copies_input_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.m4a");
        let output = dir.path().join("out.wav");
        tokio::fs::write(&input, b"payload").await.unwrap();

        let transcoder = MockTranscoder::new();
        let outcome = transcoder
            .transcode(TranscodeJob {
                input_path: input,
                output_path: output.clone(),
                clip: None,
                params: EncodeParams::default(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.output_size_bytes, 7);
        assert!(output.exists());
        assert_eq!(transcoder.job_count().await, 1);
    }

    #[tokio::test]
    async fn injected_failure_by_output_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.m4a");
        tokio::fs::write(&input, b"payload").await.unwrap();

        let transcoder = MockTranscoder::new();
        transcoder.fail_for("broken").await;

        let result = transcoder
            .transcode(TranscodeJob {
                input_path: input,
                output_path: dir.path().join("broken.wav"),
                clip: None,
                params: EncodeParams::default(),
            })
            .await;

        assert!(matches!(
            result,
            Err(TranscoderError::TranscodeFailed { .. })
        ));
    }
}
