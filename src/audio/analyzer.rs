use crate::audio::types::AudioData;
use crate::error::{AudioError, Result};

/// RMS energy of one analysis window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWindow {
    /// Window start in seconds
    pub time: f64,
    pub rms: f64,
}

/// Locates the loudest stretch of a music track
#[derive(Debug, Clone)]
pub struct AudioAnalyzer {
    window_sec: f64,
}

impl Default for AudioAnalyzer {
    fn default() -> Self {
        Self { window_sec: 2.0 }
    }
}

impl AudioAnalyzer {
    pub fn new(window_sec: f64) -> Self {
        Self { window_sec }
    }

    pub fn window_sec(&self) -> f64 {
        self.window_sec
    }

    /// RMS energy over windows with 50% overlap, computed on the mono mix
    pub fn energy_profile(&self, audio: &AudioData) -> Result<Vec<EnergyWindow>> {
        if audio.sample_rate == 0 || !(self.window_sec > 0.0) {
            return Err(AudioError::InvalidParameters {
                details: format!(
                    "sample_rate={} window_sec={}",
                    audio.sample_rate, self.window_sec
                ),
            }
            .into());
        }

        let samples = audio.mono_samples();
        let sample_rate = audio.sample_rate as f64;
        let window_samples = (self.window_sec * sample_rate) as usize;

        if window_samples == 0 || window_samples >= samples.len() {
            return Err(AudioError::AnalysisFailed {
                reason: format!(
                    "track of {:.2}s is shorter than one {:.2}s window",
                    audio.duration, self.window_sec
                ),
            }
            .into());
        }

        let hop_samples = (window_samples / 2).max(1); // 50% overlap
        let energies = samples
            .windows(window_samples)
            .step_by(hop_samples)
            .enumerate()
            .map(|(i, window)| {
                let power = window.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>()
                    / window.len() as f64;
                EnergyWindow {
                    time: (i * hop_samples) as f64 / sample_rate,
                    rms: power.sqrt(),
                }
            })
            .collect();

        Ok(energies)
    }

    /// Start time of the loudest window, clamped so that `needed` seconds fit
    /// before the end of the track
    pub fn highlight_start(&self, audio: &AudioData, needed: f64) -> Result<f64> {
        let energies = self.energy_profile(audio)?;

        // First maximum wins on ties
        let peak = energies
            .iter()
            .fold(None::<&EnergyWindow>, |best, window| match best {
                Some(b) if b.rms >= window.rms => Some(b),
                _ => Some(window),
            })
            .ok_or_else(|| AudioError::AnalysisFailed { reason: "no energy windows".to_string() })?;

        let max_start = (audio.duration - needed).max(0.0);
        Ok(peak.time.min(max_start))
    }
}

/// Offset of the most energetic `window` seconds of `track`, or 0 when the
/// track is too short or cannot be analysed
pub fn find_highlight_start(track: &AudioData, needed: f64, window: f64) -> f64 {
    match AudioAnalyzer::new(window).highlight_start(track, needed) {
        Ok(offset) => offset,
        Err(e) => {
            tracing::debug!("Highlight detection fell back to 0s: {}", e);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Quiet track with a loud burst between `loud_from` and `loud_to` seconds
    fn track_with_burst(duration: f64, loud_from: f64, loud_to: f64) -> AudioData {
        let sr = 1000;
        let samples = (0..(duration * sr as f64) as usize)
            .map(|i| {
                let t = i as f64 / sr as f64;
                let amp = if (loud_from..loud_to).contains(&t) { 0.9 } else { 0.05 };
                (amp * (t * 440.0 * std::f64::consts::TAU).sin()) as f32
            })
            .collect();
        AudioData::new(samples, sr, 1)
    }

    #[test]
    fn test_energy_windows_overlap_by_half() {
        let audio = track_with_burst(10.0, 4.0, 6.0);
        let energies = AudioAnalyzer::new(2.0).energy_profile(&audio).unwrap();
        assert_eq!(energies[1].time, 1.0);
        assert_eq!(energies.len(), 9);
        assert!(energies.iter().all(|e| e.rms >= 0.0));
    }

    #[test]
    fn test_finds_loud_section() {
        let audio = track_with_burst(30.0, 10.0, 12.0);
        let start = find_highlight_start(&audio, 5.0, 2.0);
        assert!((start - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_so_needed_duration_fits() {
        let audio = track_with_burst(20.0, 17.0, 19.0);
        let start = find_highlight_start(&audio, 8.0, 2.0);
        assert!((start - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_stays_in_range_for_long_tracks() {
        let audio = track_with_burst(12.0, 0.0, 12.0);
        for needed in [1.0, 4.0, 9.5, 10.0] {
            let start = find_highlight_start(&audio, needed, 2.0);
            assert!(start >= 0.0);
            assert!(start <= audio.duration - needed + 1e-9);
        }
    }

    #[test]
    fn test_short_track_falls_back_to_zero() {
        let audio = track_with_burst(1.5, 0.0, 1.5);
        assert_eq!(find_highlight_start(&audio, 10.0, 2.0), 0.0);
        assert!(AudioAnalyzer::new(2.0).highlight_start(&audio, 10.0).is_err());
    }
}
