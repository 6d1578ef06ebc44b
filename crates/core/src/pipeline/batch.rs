//! Batch orchestration over many work items.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::fetcher::MediaFetcher;
use crate::transcoder::Transcoder;

use super::single::ClipFetcher;
use super::types::WorkItem;

/// Options for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Size of the worker pool. A value of 1 (or 0) processes items one at a
    /// time in the calling task.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Submit at most this many items; the rest of the list is not attempted.
    #[serde(default)]
    pub max_count: Option<usize>,
}

fn default_concurrency() -> usize {
    8
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_count: None,
        }
    }
}

impl<F, T> ClipFetcher<F, T>
where
    F: MediaFetcher + 'static,
    T: Transcoder + 'static,
{
    /// Runs [`fetch_one`](ClipFetcher::fetch_one) over a list of items and
    /// collects a map from identifier to result.
    ///
    /// Items are submitted in input order, capped by `max_count`. With
    /// `concurrency > 1` every submitted item is handed to a fixed-size
    /// worker pool and all results are awaited before returning; otherwise
    /// items run sequentially. Both modes produce an equivalent mapping.
    /// Duplicate identifiers are not deduplicated: the last submission wins.
    ///
    /// One item's failure never aborts the rest; failed items map to `None`.
    pub async fn fetch_many(
        &self,
        items: &[WorkItem],
        options: &BatchOptions,
    ) -> HashMap<String, Option<PathBuf>> {
        let cutoff = options.max_count.map_or(items.len(), |max| max.min(items.len()));
        let submitted = &items[..cutoff];
        let total = submitted.len();
        if total < items.len() {
            debug!(submitted = total, skipped = items.len() - total, "submission capped");
        }

        if options.concurrency <= 1 {
            let mut results = HashMap::with_capacity(total);
            for (idx, item) in submitted.iter().enumerate() {
                let path = self.fetch_one(item).await;
                results.insert(item.id.clone(), path);
                info!(completed = idx + 1, total, "batch progress");
            }
            return results;
        }

        let semaphore = Arc::new(Semaphore::new(options.concurrency));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut ids = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        for item in submitted {
            let worker = self.clone();
            let item = item.clone();
            let semaphore = Arc::clone(&semaphore);
            let completed = Arc::clone(&completed);
            ids.push(item.id.clone());
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return None, // pool semaphore is never closed
                };
                let path = worker.fetch_one(&item).await;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                info!(completed = done, total, "batch progress");
                path
            }));
        }

        let mut results = HashMap::with_capacity(total);
        for (id, joined) in ids.into_iter().zip(join_all(handles).await) {
            let path = match joined {
                Ok(path) => path,
                Err(error) => {
                    warn!(id = %id, %error, "batch worker terminated abnormally");
                    None
                }
            };
            results.insert(id, path);
        }
        results
    }
}
