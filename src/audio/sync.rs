use crate::audio::types::AudioData;
use crate::error::{AudioError, Result};

/// Cut `needed` seconds of audio out of `track` starting at `offset`.
///
/// When the track ends before `needed` is covered, the tail from `offset` is
/// followed by whole repeats of the track and the result trimmed to the exact
/// frame count. An offset past the end of the track restarts from 0.
pub fn build_audio(track: &AudioData, needed: f64, offset: f64) -> Result<AudioData> {
    if track.sample_rate == 0 || track.frame_len() == 0 {
        return Err(AudioError::InvalidParameters {
            details: "cannot build a clip from an empty track".to_string(),
        }
        .into());
    }
    if !(needed > 0.0) || !needed.is_finite() {
        return Err(AudioError::InvalidParameters {
            details: format!("needed duration must be positive, got {}", needed),
        }
        .into());
    }

    let offset = if offset.is_finite() && offset >= 0.0 && offset < track.duration {
        offset
    } else {
        0.0
    };

    let total_frames = track.frame_len();
    let needed_frames = (needed * track.sample_rate as f64).round() as usize;
    let start = track.frame_at(offset);

    if start + needed_frames <= total_frames {
        return Ok(track.slice_frames(start, start + needed_frames));
    }

    let ch = track.channels as usize;
    let mut samples = Vec::with_capacity(needed_frames * ch);
    samples.extend_from_slice(&track.samples[start * ch..]);
    while samples.len() < needed_frames * ch {
        samples.extend_from_slice(&track.samples);
    }
    samples.truncate(needed_frames * ch);

    Ok(AudioData::new(samples, track.sample_rate, track.channels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(seconds: f64, sample_rate: u32) -> AudioData {
        let frames = (seconds * sample_rate as f64) as usize;
        AudioData::new((0..frames).map(|i| i as f32).collect(), sample_rate, 1)
    }

    #[test]
    fn test_slice_when_it_fits() {
        let track = ramp(10.0, 100);
        let clip = build_audio(&track, 3.0, 2.0).unwrap();
        assert_eq!(clip.frame_len(), 300);
        assert_eq!(clip.samples[0], 200.0);
    }

    #[test]
    fn test_loops_short_track_to_exact_length() {
        let track = ramp(5.0, 100);
        let clip = build_audio(&track, 12.0, 3.0).unwrap();

        assert_eq!(clip.frame_len(), 1200);
        assert!((clip.duration - 12.0).abs() < 1e-9);
        // tail from the offset, then the track from its start
        assert_eq!(clip.samples[0], 300.0);
        assert_eq!(clip.samples[199], 499.0);
        assert_eq!(clip.samples[200], 0.0);
        assert_eq!(clip.samples[700], 0.0);
        assert_eq!(clip.samples[1199], 499.0);
    }

    #[test]
    fn test_stereo_frames_stay_aligned() {
        let samples: Vec<f32> = (0..200).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let track = AudioData::new(samples, 100, 2);
        let clip = build_audio(&track, 2.5, 0.5).unwrap();
        assert_eq!(clip.frame_len(), 250);
        assert!(clip.samples.chunks(2).all(|f| f == [1.0, -1.0]));
    }

    #[test]
    fn test_offset_past_end_restarts() {
        let track = ramp(5.0, 100);
        let clip = build_audio(&track, 2.0, 7.0).unwrap();
        assert_eq!(clip.samples[0], 0.0);
        assert_eq!(clip.frame_len(), 200);
    }

    #[test]
    fn test_empty_track_is_an_error() {
        let track = AudioData::new(Vec::new(), 44100, 2);
        assert!(build_audio(&track, 1.0, 0.0).is_err());
    }
}
