//! Single-item fetch lifecycle integration tests.
//!
//! These tests drive `ClipFetcher::fetch_one` with mock capabilities and
//! verify:
//! - Output naming and placement under the destination directory
//! - Caller errors rejected before any fetch I/O
//! - Fetch/transcode failure containment (absent result, nothing thrown)
//! - Scratch directory cleanup on every exit path
//! - Overwrite-on-repeat idempotence

use std::path::PathBuf;

use tempfile::TempDir;

use clipfetch_core::{
    testing::{MockFetcher, MockTranscoder},
    ClipFetcher, ClipRange, EncodeParams, FetchPlan, MediaKind, OutputNaming, SampleDepth,
    WorkItem,
};

/// Test helper wiring a clip fetcher to mock capabilities.
struct TestHarness {
    fetcher: MockFetcher,
    transcoder: MockTranscoder,
    clips: ClipFetcher<MockFetcher, MockTranscoder>,
    output_dir: PathBuf,
    work_root: TempDir,
    _base: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_naming("AudioSet", "wav")
    }

    fn with_naming(prefix: &str, suffix: &str) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let base = TempDir::new().expect("Failed to create base dir");
        let work_root = TempDir::new().expect("Failed to create work root");
        // Not pre-created: fetch_one must create it on demand.
        let output_dir = base.path().join("clips");

        let fetcher = MockFetcher::new();
        let transcoder = MockTranscoder::new();

        let plan = FetchPlan {
            kind: MediaKind::Audio,
            encode: EncodeParams {
                sample_rate_hz: Some(16000),
                sample_depth: Some(SampleDepth::S16),
                mono: true,
                ..Default::default()
            },
            naming: OutputNaming {
                dir: output_dir.clone(),
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            work_root: Some(work_root.path().to_path_buf()),
        };

        let clips = ClipFetcher::new(fetcher.clone(), transcoder.clone(), plan);

        Self {
            fetcher,
            transcoder,
            clips,
            output_dir,
            work_root,
            _base: base,
        }
    }

    /// Number of scratch directories still present under the work root.
    fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.work_root.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

#[tokio::test]
async fn audio_clip_lands_with_prefixed_name() {
    let harness = TestHarness::new();

    let path = harness
        .clips
        .fetch_one(&WorkItem::whole("abc123"))
        .await
        .expect("fetch should succeed");

    assert_eq!(path, harness.output_dir.join("AudioSet.abc123.wav"));
    assert!(path.exists());
    assert!(path.starts_with(&harness.output_dir));
    assert_eq!(harness.scratch_entries(), 0);

    let jobs = harness.transcoder.recorded_jobs().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].params.sample_rate_hz, Some(16000));
    assert!(jobs[0].params.mono);
}

#[tokio::test]
async fn empty_prefix_drops_prefix_segment() {
    let harness = TestHarness::with_naming("", "wav");

    let path = harness
        .clips
        .fetch_one(&WorkItem::whole("abc123"))
        .await
        .expect("fetch should succeed");

    assert_eq!(path, harness.output_dir.join("abc123.wav"));
}

#[tokio::test]
async fn fetch_failure_yields_absent_and_clean_scratch() {
    let harness = TestHarness::new();
    harness.fetcher.fail_for("bad_id").await;

    let result = harness.clips.fetch_one(&WorkItem::whole("bad_id")).await;

    assert!(result.is_none());
    // Transcode is skipped entirely on fetch failure.
    assert_eq!(harness.transcoder.job_count().await, 0);
    assert_eq!(harness.scratch_entries(), 0);
    assert!(!harness.output_dir.join("AudioSet.bad_id.wav").exists());
}

#[tokio::test]
async fn transcode_failure_yields_absent_and_clean_scratch() {
    let harness = TestHarness::new();
    harness.transcoder.fail_for("abc123").await;

    let result = harness.clips.fetch_one(&WorkItem::whole("abc123")).await;

    assert!(result.is_none());
    assert_eq!(harness.fetcher.request_count().await, 1);
    assert_eq!(harness.scratch_entries(), 0);
}

#[tokio::test]
async fn inverted_range_rejected_before_any_io() {
    let harness = TestHarness::new();

    let result = harness
        .clips
        .fetch_one(&WorkItem::new("abc123", 10.0, Some(5.0)))
        .await;

    assert!(result.is_none());
    assert_eq!(harness.fetcher.request_count().await, 0);
    assert_eq!(harness.transcoder.job_count().await, 0);
}

#[tokio::test]
async fn zero_length_range_rejected_before_any_io() {
    let harness = TestHarness::new();

    let result = harness
        .clips
        .fetch_one(&WorkItem::new("abc123", 10.0, Some(10.0)))
        .await;

    assert!(result.is_none());
    assert_eq!(harness.fetcher.request_count().await, 0);
}

#[tokio::test]
async fn empty_identifier_rejected_before_any_io() {
    let harness = TestHarness::new();

    let result = harness.clips.fetch_one(&WorkItem::whole("")).await;

    assert!(result.is_none());
    assert_eq!(harness.fetcher.request_count().await, 0);
}

#[tokio::test]
async fn trim_range_reaches_the_transcoder() {
    let harness = TestHarness::new();

    harness
        .clips
        .fetch_one(&WorkItem::new("abc123", 1.5, Some(4.0)))
        .await
        .expect("fetch should succeed");

    let jobs = harness.transcoder.recorded_jobs().await;
    assert_eq!(jobs[0].clip, Some(ClipRange::new(1.5, Some(4.0)).unwrap()));
}

#[tokio::test]
async fn whole_clip_requests_no_trim() {
    let harness = TestHarness::new();

    harness
        .clips
        .fetch_one(&WorkItem::whole("abc123"))
        .await
        .expect("fetch should succeed");

    let jobs = harness.transcoder.recorded_jobs().await;
    assert_eq!(jobs[0].clip, None);
}

#[tokio::test]
async fn fetch_request_carries_canonical_url_and_scratch_dir() {
    let harness = TestHarness::new();

    harness
        .clips
        .fetch_one(&WorkItem::whole("abc123"))
        .await
        .expect("fetch should succeed");

    let requests = harness.fetcher.recorded_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://youtu.be/abc123");
    assert_eq!(requests[0].kind, MediaKind::Audio);
    assert!(requests[0].work_dir.starts_with(harness.work_root.path()));
}

#[tokio::test]
async fn repeated_fetch_overwrites_existing_output() {
    let harness = TestHarness::new();
    let item = WorkItem::whole("abc123");

    let first = harness.clips.fetch_one(&item).await.expect("first fetch");
    harness
        .fetcher
        .set_artifact(b"second payload, longer than the first".to_vec(), "m4a")
        .await;
    let second = harness.clips.fetch_one(&item).await.expect("second fetch");

    assert_eq!(first, second);
    let content = tokio::fs::read(&second).await.unwrap();
    assert_eq!(content, b"second payload, longer than the first");
}
