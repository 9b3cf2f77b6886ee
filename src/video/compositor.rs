use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, info, warn};

use crate::audio::AudioData;
use crate::error::{Result, VideoError};
use crate::video::sink::FrameSink;
use crate::video::types::{Frame, VideoParams};

/// Represents an encoded video output
#[derive(Debug, Clone)]
pub struct EncodedVideo {
    pub path: PathBuf,
    pub duration: f64,
    pub frame_count: usize,
    pub file_size: u64,
}

/// Encodes frames with an external `ffmpeg` process
#[derive(Debug, Clone)]
pub struct VideoCompositor {
    params: VideoParams,
}

impl VideoCompositor {
    pub fn new(params: VideoParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VideoParams {
        &self.params
    }

    pub fn check_ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Start an encode into `output_path`.
    ///
    /// The video is written to a temporary file beside the target and only
    /// renamed into place by [`FfmpegSink::finish`]. `audio`, when given, is
    /// written as a temporary WAV and muxed as AAC.
    pub fn start<P: AsRef<Path>>(&self, output_path: P, audio: Option<&AudioData>) -> Result<FfmpegSink> {
        self.validate()?;
        let output_path = output_path.as_ref().to_path_buf();
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let partial_path = sibling_path(&output_path, "partial");
        let audio_path = match audio {
            Some(clip) => {
                let path = sibling_path(&output_path, "audio").with_extension("wav");
                clip.write_wav(&path)?;
                debug!("Wrote {:.2}s audio clip to {}", clip.duration, path.display());
                Some(path)
            }
            None => None,
        };

        let mut command = self.command(&partial_path, audio_path.as_deref());
        debug!("Spawning {:?}", command);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(error) => {
                if let Some(path) = &audio_path {
                    let _ = std::fs::remove_file(path);
                }
                let reason = if error.kind() == ErrorKind::NotFound {
                    "ffmpeg was not found on PATH. Install ffmpeg and verify `ffmpeg -version` works.".to_string()
                } else {
                    format!("failed to spawn ffmpeg: {}", error)
                };
                return Err(VideoError::EncodingFailed { reason }.into());
            }
        };

        let stdin = child.stdin.take().ok_or_else(|| VideoError::EncodingFailed {
            reason: "failed to capture ffmpeg stdin".to_string(),
        })?;

        info!(
            "Encoding {}x{} @ {}fps ({}, preset {}, crf {}, {} threads) to {}",
            self.params.width,
            self.params.height,
            self.params.fps,
            self.params.codec,
            self.params.preset,
            self.params.crf,
            self.params.threads,
            output_path.display()
        );

        Ok(FfmpegSink {
            child: Some(child),
            stdin: Some(stdin),
            frame_size: (self.params.width, self.params.height),
            fps: self.params.fps,
            frames_written: 0,
            partial_path,
            output_path,
            audio_path,
        })
    }

    /// yuv420p output needs non-zero even dimensions
    fn validate(&self) -> Result<()> {
        let (width, height, fps) = (self.params.width, self.params.height, self.params.fps);
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(VideoError::InvalidParameters {
                details: format!("{}x{} must be non-zero and even", width, height),
            }
            .into());
        }
        if fps == 0 {
            return Err(VideoError::InvalidParameters { details: "fps must be positive".to_string() }.into());
        }
        Ok(())
    }

    fn command(&self, partial_path: &Path, audio_path: Option<&Path>) -> Command {
        let params = &self.params;
        let mut command = Command::new("ffmpeg");
        command
            .args(["-hide_banner", "-loglevel", "error", "-y"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
            .arg("-s")
            .arg(format!("{}x{}", params.width, params.height))
            .arg("-r")
            .arg(params.fps.to_string())
            .args(["-i", "-"]);

        if let Some(audio) = audio_path {
            command.arg("-i").arg(audio);
        }

        command
            .arg("-c:v")
            .arg(&params.codec)
            .arg("-preset")
            .arg(&params.preset)
            .arg("-crf")
            .arg(params.crf.to_string())
            .arg("-threads")
            .arg(params.threads.to_string())
            .args(["-pix_fmt", "yuv420p"]);

        if audio_path.is_some() {
            command.args(["-c:a", "aac", "-shortest"]);
        } else {
            command.arg("-an");
        }

        command
            .args(["-movflags", "+faststart"])
            .arg(partial_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        command
    }
}

/// `out.mp4` -> `out.<tag>.mp4` in the same directory
fn sibling_path(output: &Path, tag: &str) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("video");
    let name = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(".{}.{}.{}", stem, tag, ext),
        None => format!(".{}.{}", stem, tag),
    };
    output.with_file_name(name)
}

/// A running encode. Dropping it without calling `finish` kills ffmpeg and
/// removes the temporary files, so no partial video is left behind.
pub struct FfmpegSink {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    frame_size: (u32, u32),
    fps: u32,
    frames_written: usize,
    partial_path: PathBuf,
    output_path: PathBuf,
    audio_path: Option<PathBuf>,
}

impl FfmpegSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if frame.size() != self.frame_size {
            return Err(VideoError::FrameSizeMismatch { expected: self.frame_size, actual: frame.size() }.into());
        }
        let bytes = frame.as_rgb_bytes();
        let stdin = self.stdin.as_mut().ok_or_else(|| VideoError::EncodingFailed {
            reason: "ffmpeg stdin already closed".to_string(),
        })?;
        stdin.write_all(bytes).map_err(|e| VideoError::EncodingFailed {
            reason: format!("failed to write frame to ffmpeg: {}", e),
        })?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close the stream, wait for ffmpeg and move the file into place
    pub fn finish(mut self) -> Result<EncodedVideo> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin.flush().map_err(|e| VideoError::EncodingFailed {
                reason: format!("failed to flush ffmpeg stdin: {}", e),
            })?;
        }

        let mut child = self.child.take().ok_or_else(|| VideoError::EncodingFailed {
            reason: "ffmpeg process already reaped".to_string(),
        })?;
        let status = child.wait().map_err(|e| VideoError::EncodingFailed {
            reason: format!("failed waiting for ffmpeg: {}", e),
        })?;
        if !status.success() {
            return Err(VideoError::EncodingFailed { reason: format!("ffmpeg exited with {}", status) }.into());
        }

        std::fs::rename(&self.partial_path, &self.output_path)?;
        let file_size = std::fs::metadata(&self.output_path)?.len();

        let encoded = EncodedVideo {
            path: self.output_path.clone(),
            duration: self.frames_written as f64 / self.fps.max(1) as f64,
            frame_count: self.frames_written,
            file_size,
        };
        info!(
            "Encoded {} frames ({:.2}s, {}KB) to {}",
            encoded.frame_count,
            encoded.duration,
            encoded.file_size / 1024,
            encoded.path.display()
        );
        Ok(encoded)
    }
}

impl FrameSink for FfmpegSink {
    fn push(&mut self, frame: &Frame) -> Result<()> {
        self.write_frame(frame)
    }

    fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        self.stdin.take();
        if let Some(mut child) = self.child.take() {
            warn!("Encode to {} aborted after {} frames", self.output_path.display(), self.frames_written);
            let _ = child.kill();
            let _ = child.wait();
        }
        if self.partial_path.exists() {
            let _ = std::fs::remove_file(&self.partial_path);
        }
        if let Some(audio) = self.audio_path.take() {
            if let Err(e) = std::fs::remove_file(&audio) {
                debug!("Failed to remove temporary audio {}: {}", audio.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn params() -> VideoParams {
        VideoParams { width: 64, height: 96, fps: 30, threads: 2, ..VideoParams::default() }
    }

    #[test]
    fn test_sibling_paths() {
        let out = Path::new("output/tarot_20260101_120000.mp4");
        assert_eq!(sibling_path(out, "partial"), Path::new("output/.tarot_20260101_120000.partial.mp4"));
        assert_eq!(
            sibling_path(out, "audio").with_extension("wav"),
            Path::new("output/.tarot_20260101_120000.audio.wav")
        );
    }

    #[test]
    fn test_command_arguments() {
        let compositor = VideoCompositor::new(params());
        let command = compositor.command(Path::new("out.partial.mp4"), Some(Path::new("clip.wav")));
        let args: Vec<String> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        let joined = args.join(" ");
        assert!(joined.contains("-f rawvideo -pix_fmt rgb24 -s 64x96 -r 30 -i -"));
        assert!(joined.contains("-i clip.wav"));
        assert!(joined.contains("-c:v libx264 -preset fast -crf 23 -threads 2"));
        assert!(joined.contains("-c:a aac -shortest"));
        assert_eq!(args.last().map(String::as_str), Some("out.partial.mp4"));
    }

    #[test]
    fn test_dropped_sink_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("reading.mp4");
        let partial_path = sibling_path(&output_path, "partial");
        let audio_path = sibling_path(&output_path, "audio").with_extension("wav");
        std::fs::write(&partial_path, b"half an mp4").unwrap();
        AudioData::new(vec![0.0; 800], 8000, 1).write_wav(&audio_path).unwrap();

        let sink = FfmpegSink {
            child: None,
            stdin: None,
            frame_size: (64, 96),
            fps: 30,
            frames_written: 12,
            partial_path: partial_path.clone(),
            output_path: output_path.clone(),
            audio_path: Some(audio_path.clone()),
        };
        drop(sink);

        assert!(!partial_path.exists());
        assert!(!audio_path.exists());
        assert!(!output_path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_odd_size_is_rejected_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("nested").join("out.mp4");
        let compositor = VideoCompositor::new(VideoParams { width: 63, ..params() });

        match compositor.start(&output_path, None) {
            Err(RenderError::Video(VideoError::InvalidParameters { details })) => assert!(details.contains("63x96")),
            Err(other) => panic!("expected invalid parameters, got {}", other),
            Ok(_) => panic!("odd width should not start an encode"),
        }
        assert!(!dir.path().join("nested").exists());

        let still = VideoCompositor::new(VideoParams { fps: 0, ..params() });
        assert!(still.start(&output_path, None).is_err());
    }

    #[test]
    fn test_closed_sink_rejects_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FfmpegSink {
            child: None,
            stdin: None,
            frame_size: (64, 96),
            fps: 30,
            frames_written: 0,
            partial_path: dir.path().join(".out.partial.mp4"),
            output_path: dir.path().join("out.mp4"),
            audio_path: None,
        };

        assert!(sink.push(&Frame::new_filled(32, 32, [0, 0, 0])).is_err());
        assert!(sink.push(&Frame::new_filled(64, 96, [0, 0, 0])).is_err());
        assert_eq!(sink.frames_written(), 0);
    }

    #[test]
    fn test_aborted_encode_leaves_no_files() {
        if !VideoCompositor::check_ffmpeg_available() {
            eprintln!("ffmpeg not installed, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("reading.mp4");
        let clip = AudioData::new(vec![0.1; 8000], 8000, 1);

        let mut sink = VideoCompositor::new(params()).start(&output_path, Some(&clip)).unwrap();
        let frame = Frame::new_filled(64, 96, [26, 10, 46]);
        for _ in 0..5 {
            sink.push(&frame).unwrap();
        }
        drop(sink);

        assert!(!output_path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_silent_command_drops_audio() {
        let compositor = VideoCompositor::new(params());
        let command = compositor.command(Path::new("out.mp4"), None);
        let args: Vec<String> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert!(args.contains(&"-an".to_string()));
        assert!(!args.contains(&"aac".to_string()));
    }
}
