use std::path::{Path, PathBuf};

use crate::error::{AudioError, Result};

/// Decoded PCM audio, interleaved when multi-channel
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples (interleaved for stereo, mono for single channel)
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Duration in seconds
    pub duration: f64,

    /// File the samples were decoded from, if any
    pub source: Option<PathBuf>,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        let channels = channels.max(1);
        let duration = if sample_rate == 0 {
            0.0
        } else {
            samples.len() as f64 / (sample_rate as f64 * channels as f64)
        };
        Self {
            samples,
            sample_rate,
            channels,
            duration,
            source: None,
        }
    }

    /// Digital silence of the given length
    pub fn silence(seconds: f64, sample_rate: u32, channels: u16) -> Self {
        let frames = (seconds.max(0.0) * sample_rate as f64).round() as usize;
        Self::new(vec![0.0; frames * channels.max(1) as usize], sample_rate, channels)
    }

    pub fn with_source<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Number of sample frames (one sample per channel)
    pub fn frame_len(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Get mono mix of all channels
    pub fn mono_samples(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }

        self.samples
            .chunks(self.channels as usize)
            .map(|chunk| chunk.iter().sum::<f32>() / self.channels as f32)
            .collect()
    }

    /// Frame index for a time in seconds, clamped to the track
    pub fn frame_at(&self, seconds: f64) -> usize {
        let frame = (seconds.max(0.0) * self.sample_rate as f64).round() as usize;
        frame.min(self.frame_len())
    }

    /// Copy of the frames `[start, end)`
    pub fn slice_frames(&self, start: usize, end: usize) -> AudioData {
        let ch = self.channels as usize;
        let end = end.min(self.frame_len());
        let start = start.min(end);
        AudioData::new(
            self.samples[start * ch..end * ch].to_vec(),
            self.sample_rate,
            self.channels,
        )
    }

    /// Write the clip as a 32-bit float WAV file
    pub fn write_wav<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let write_failed = |e: hound::Error| AudioError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut writer = hound::WavWriter::create(path, spec).map_err(write_failed)?;
        for sample in &self.samples {
            writer.write_sample(*sample).map_err(write_failed)?;
        }
        writer.finalize().map_err(write_failed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_duration_from_interleaved_samples() {
        let audio = AudioData::new(vec![0.0; 44100 * 2], 44100, 2);
        assert_eq!(audio.frame_len(), 44100);
        assert!((audio.duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mono_mix() {
        let audio = AudioData::new(vec![1.0, 0.0, 0.5, 0.5], 10, 2);
        assert_eq!(audio.mono_samples(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_slice_clamps_to_track() {
        let audio = AudioData::new((0..10).map(|i| i as f32).collect(), 10, 1);
        let slice = audio.slice_frames(8, 20);
        assert_eq!(slice.samples, vec![8.0, 9.0]);
        assert!(audio.slice_frames(12, 20).samples.is_empty());
    }

    #[test]
    fn test_write_wav_round_trip_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let audio = AudioData::new(vec![0.25; 800], 400, 2);
        audio.write_wav(&path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.len(), 800);
    }
}
