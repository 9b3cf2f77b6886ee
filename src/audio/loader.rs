use std::fs::File;
use std::path::{Path, PathBuf};

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::audio::types::AudioData;
use crate::error::{AudioError, RenderError, Result};

/// Music file loader: WAV through hound, compressed formats through symphonia
pub struct AudioLoader;

impl AudioLoader {
    /// Load an audio file and return raw audio data
    ///
    /// Decoding is CPU bound and runs on the blocking pool.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<AudioData> {
        let path = path.as_ref().to_path_buf();
        let extension = Self::detect_format(&path).unwrap_or_default();

        if !Self::is_format_supported(&extension) {
            return Err(AudioError::UnsupportedFormat { format: extension }.into());
        }

        tokio::task::spawn_blocking(move || Self::load_blocking(&path, &extension))
            .await
            .map_err(|e| RenderError::generic(format!("audio decode task failed: {}", e)))?
    }

    fn load_blocking(path: &Path, extension: &str) -> Result<AudioData> {
        let audio = match extension {
            "wav" => Self::load_wav(path)?,
            _ => Self::load_with_symphonia(path)?,
        };

        if audio.sample_rate == 0 || audio.samples.is_empty() {
            return Err(AudioError::LoadFailed { path: path.display().to_string() }.into());
        }

        debug!(
            "Decoded {} ({:.2}s, {} Hz, {} ch)",
            path.display(),
            audio.duration,
            audio.sample_rate,
            audio.channels
        );
        Ok(audio.with_source(PathBuf::from(path)))
    }

    fn load_wav(path: &Path) -> Result<AudioData> {
        let load_failed = || AudioError::LoadFailed { path: path.display().to_string() };

        let reader = hound::WavReader::open(path).map_err(|_| load_failed())?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| load_failed())?,
            hound::SampleFormat::Int => reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| Self::int_to_float(v, spec.bits_per_sample)))
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| load_failed())?,
        };

        Ok(AudioData::new(samples, spec.sample_rate, spec.channels))
    }

    fn load_with_symphonia(path: &Path) -> Result<AudioData> {
        let load_failed = || AudioError::LoadFailed { path: path.display().to_string() };

        let file = File::open(path).map_err(|_| load_failed())?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(extension);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|_| load_failed())?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(load_failed)?;
        let track_id = track.id;

        let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
            AudioError::InvalidParameters { details: "No sample rate found".to_string() }
        })?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|_| load_failed())?;

        let mut samples = Vec::new();
        let mut channels = track.codec_params.channels.map(|c| c.count() as u16);
        let mut buffer: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                // End of stream surfaces as an IO error
                Err(_) => break,
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    channels.get_or_insert(spec.channels.count() as u16);

                    let frames = decoded.capacity() as u64;
                    let needed = decoded.capacity() * spec.channels.count();
                    if buffer.as_ref().map_or(true, |buf| buf.capacity() < needed) {
                        buffer = Some(SampleBuffer::new(frames, spec));
                    }
                    if let Some(buf) = buffer.as_mut() {
                        buf.copy_interleaved_ref(decoded);
                        samples.extend_from_slice(buf.samples());
                    }
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("Skipping undecodable packet in {}: {}", path.display(), e);
                }
                Err(_) => break,
            }
        }

        let channels = channels.ok_or_else(|| AudioError::InvalidParameters {
            details: "No channel information found".to_string(),
        })?;

        Ok(AudioData::new(samples, sample_rate, channels))
    }

    /// Convert integer sample to float (-1.0 to 1.0)
    fn int_to_float(sample: i32, bit_depth: u16) -> f32 {
        match bit_depth {
            8 => sample as f32 / 128.0,
            16 => sample as f32 / 32768.0,
            24 => sample as f32 / 8388608.0,
            32 => sample as f32 / 2147483648.0,
            _ => sample as f32 / 32768.0,
        }
    }

    /// Detect audio format from file extension
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Check if a file format is supported
    pub fn is_format_supported(extension: &str) -> bool {
        matches!(
            extension.to_lowercase().as_str(),
            "wav" | "mp3" | "flac" | "ogg" | "m4a" | "aac"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(AudioLoader::detect_format("song.wav"), Some("wav".to_string()));
        assert_eq!(AudioLoader::detect_format("song.MP3"), Some("mp3".to_string()));
        assert_eq!(AudioLoader::detect_format("song"), None);
    }

    #[test]
    fn test_format_support() {
        assert!(AudioLoader::is_format_supported("m4a"));
        assert!(AudioLoader::is_format_supported("FLAC"));
        assert!(!AudioLoader::is_format_supported("mid"));
    }

    #[test]
    fn test_int_to_float_conversion() {
        assert_eq!(AudioLoader::int_to_float(0, 16), 0.0);
        assert_eq!(AudioLoader::int_to_float(-32768, 16), -1.0);
        assert_eq!(AudioLoader::int_to_float(-8388608, 24), -1.0);
    }

    #[tokio::test]
    async fn test_load_wav_written_by_hound() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..16000 {
            writer.write_sample(((i % 100) as i16 - 50) * 100).unwrap();
        }
        writer.finalize().unwrap();

        let audio = AudioLoader::load(&path).await.unwrap();
        assert_eq!(audio.sample_rate, 8000);
        assert!((audio.duration - 2.0).abs() < 1e-9);
        assert_eq!(audio.source.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.mid");
        File::create(&path).unwrap().write_all(b"MThd").unwrap();

        match AudioLoader::load(&path).await {
            Err(RenderError::Audio(AudioError::UnsupportedFormat { format })) => {
                assert_eq!(format, "mid");
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other.map(|a| a.duration)),
        }
    }

    #[tokio::test]
    async fn test_corrupt_wav_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        File::create(&path).unwrap().write_all(b"not a wav").unwrap();
        assert!(AudioLoader::load(&path).await.is_err());
    }
}
