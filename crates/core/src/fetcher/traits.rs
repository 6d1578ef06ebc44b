//! Trait definitions for the fetcher module.

use async_trait::async_trait;

use super::error::FetcherError;
use super::types::{FetchRequest, FetchedMedia};

/// A capability that acquires remote media onto local disk.
///
/// Implementations must deposit exactly one file into the request's working
/// directory and report its path; they must never rely on the process working
/// directory.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Returns the name of this fetcher implementation.
    fn name(&self) -> &str;

    /// Fetches the requested media into `request.work_dir`.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedMedia, FetcherError>;

    /// Validates that the fetcher is properly configured and ready.
    async fn validate(&self) -> Result<(), FetcherError>;
}
