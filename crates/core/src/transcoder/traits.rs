//! Trait definitions for the transcoder module.

use async_trait::async_trait;
use std::path::Path;

use super::error::TranscoderError;
use super::types::{MediaInfo, TranscodeJob, TranscodeOutcome};

/// A capability that trims and transcodes media files.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Probes a media file to get its information.
    async fn probe(&self, path: &Path) -> Result<MediaInfo, TranscoderError>;

    /// Transcodes a media file according to the job request, overwriting
    /// the output path if it already exists.
    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeOutcome, TranscoderError>;

    /// Validates that the transcoder is properly configured and ready.
    async fn validate(&self) -> Result<(), TranscoderError>;
}
