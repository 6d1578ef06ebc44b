//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscoderError;
use super::traits::Transcoder;
use super::types::{
    AudioStreamInfo, MediaInfo, TranscodeJob, TranscodeOutcome, VideoStreamInfo,
};

/// FFmpeg-based transcoder implementation.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

/// Containers that store raw PCM, where sample depth selects the codec
/// rather than a sample format.
fn is_pcm_container(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("wav") | Some("aif") | Some("aiff")
    )
}

impl FfmpegTranscoder {
    /// Creates a new transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    /// Builds the ffmpeg argument list for one job.
    fn build_args(&self, job: &TranscodeJob) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            job.input_path.to_string_lossy().to_string(),
        ];

        // Trim after the input so seeking stays sample-accurate.
        if let Some(clip) = &job.clip {
            args.extend(["-ss".to_string(), clip.start_secs().to_string()]);
            if let Some(end) = clip.end_secs() {
                args.extend(["-to".to_string(), end.to_string()]);
            }
        }

        if let Some(rate) = job.params.sample_rate_hz {
            args.extend(["-ar".to_string(), rate.to_string()]);
        }

        if let Some(depth) = job.params.sample_depth {
            if is_pcm_container(&job.output_path) {
                args.extend(["-c:a".to_string(), depth.pcm_codec().to_string()]);
            } else {
                args.extend(["-sample_fmt".to_string(), depth.sample_fmt().to_string()]);
            }
        }

        if job.params.mono {
            args.extend(["-ac".to_string(), "1".to_string()]);
        }

        // Scale while maintaining aspect ratio, only if larger than max
        if job.params.max_width.is_some() || job.params.max_height.is_some() {
            let width = job.params.max_width.unwrap_or(u32::MAX);
            let height = job.params.max_height.unwrap_or(u32::MAX);
            args.extend([
                "-vf".to_string(),
                format!(
                    "scale='min({},iw)':'min({},ih)':force_original_aspect_ratio=decrease",
                    width, height
                ),
            ]);
        }

        if let Some(fps) = job.params.fps {
            args.extend(["-r".to_string(), fps.to_string()]);
        }

        args.extend(["-loglevel".to_string(), self.config.log_level.clone()]);
        args.extend(self.config.extra_args.iter().cloned());
        args.push(job.output_path.to_string_lossy().to_string());

        args
    }

    fn map_spawn_error(&self, err: std::io::Error) -> TranscoderError {
        if err.kind() == std::io::ErrorKind::NotFound {
            TranscoderError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            TranscoderError::Io(err)
        }
    }

    /// Parses ffprobe JSON output into MediaInfo.
    fn parse_probe_output(path: &Path, output: &str) -> Result<MediaInfo, TranscoderError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: String,
            duration: Option<String>,
            size: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: String,
            codec_name: Option<String>,
            bit_rate: Option<String>,
            sample_rate: Option<String>,
            channels: Option<u8>,
            width: Option<u32>,
            height: Option<u32>,
            r_frame_rate: Option<String>,
        }

        let probe: ProbeOutput =
            serde_json::from_str(output).map_err(|e| TranscoderError::ParseError {
                reason: format!("bad ffprobe output: {}", e),
            })?;

        let duration_secs = probe
            .format
            .duration
            .as_ref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);

        let size_bytes = probe
            .format
            .size
            .as_ref()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        let container = probe
            .format
            .format_name
            .split(',')
            .next()
            .unwrap_or("unknown")
            .to_string();

        let audio = probe
            .streams
            .iter()
            .find(|s| s.codec_type == "audio")
            .map(|s| AudioStreamInfo {
                codec: s.codec_name.clone(),
                sample_rate_hz: s.sample_rate.as_ref().and_then(|r| r.parse().ok()),
                channels: s.channels,
                bitrate_kbps: s
                    .bit_rate
                    .as_ref()
                    .and_then(|b| b.parse::<u32>().ok())
                    .map(|b| b / 1000),
            });

        let video = probe
            .streams
            .iter()
            .find(|s| s.codec_type == "video")
            .map(|s| VideoStreamInfo {
                codec: s.codec_name.clone(),
                width: s.width,
                height: s.height,
                fps: s.r_frame_rate.as_ref().and_then(|r| parse_frame_rate(r)),
            });

        Ok(MediaInfo {
            path: path.to_path_buf(),
            size_bytes,
            duration_secs,
            container,
            audio,
            video,
        })
    }
}

/// Parses a frame rate like "24000/1001" or "30/1".
fn parse_frame_rate(raw: &str) -> Option<f32> {
    match raw.split_once('/') {
        Some((num, den)) => {
            let num = num.parse::<f32>().ok()?;
            let den = den.parse::<f32>().ok()?;
            if den > 0.0 {
                Some(num / den)
            } else {
                None
            }
        }
        None => raw.parse().ok(),
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, TranscoderError> {
        if tokio::fs::metadata(path).await.is_err() {
            return Err(TranscoderError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let output = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscoderError::FfprobeNotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    TranscoderError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(TranscoderError::probe_failed(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeOutcome, TranscoderError> {
        let start = Instant::now();

        if tokio::fs::metadata(&job.input_path).await.is_err() {
            return Err(TranscoderError::InputNotFound {
                path: job.input_path.clone(),
            });
        }

        if let Some(parent) = job.output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                TranscoderError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        let args = self.build_args(&job);
        debug!(input = %job.input_path.display(), output = %job.output_path.display(), "spawning ffmpeg");

        let mut command = Command::new(&self.config.ffmpeg_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.config.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), command.output())
                .await
                .map_err(|_| TranscoderError::Timeout { timeout_secs: secs })?
                .map_err(|e| self.map_spawn_error(e))?,
            None => command.output().await.map_err(|e| self.map_spawn_error(e))?,
        };

        if !output.status.success() {
            return Err(TranscoderError::transcode_failed(
                format!("ffmpeg exited with code: {:?}", output.status.code()),
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| TranscoderError::transcode_failed("output file not created", String::new()))?;

        Ok(TranscodeOutcome {
            output_path: job.output_path,
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), TranscoderError> {
        let ffmpeg_result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        if let Err(e) = ffmpeg_result {
            return Err(self.map_spawn_error(e));
        }

        let ffprobe_result = Command::new(&self.config.ffprobe_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        if let Err(e) = ffprobe_result {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(TranscoderError::FfprobeNotFound {
                    path: self.config.ffprobe_path.clone(),
                });
            }
            return Err(TranscoderError::Io(e));
        }

        Ok(())
    }
}
