use serde::{Deserialize, Serialize};

/// Progress remapping curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    /// Smoothstep-like: `2p²` below one half, `1 - 2(1-p)²` above
    InOutQuad,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Progress of frame `index` out of `frames`, hitting 1.0 on the last frame
pub fn frame_progress(index: usize, frames: usize) -> f64 {
    if frames > 1 {
        index as f64 / (frames - 1) as f64
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_fixed() {
        for ease in [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::InOutQuad] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_in_out_quad_is_symmetric() {
        assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((Ease::InOutQuad.apply(0.25) - 0.125).abs() < 1e-12);
        assert!((Ease::InOutQuad.apply(0.75) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Ease::OutQuad.apply(-3.0), 0.0);
        assert_eq!(Ease::InQuad.apply(7.0), 1.0);
    }

    #[test]
    fn test_frame_progress() {
        assert_eq!(frame_progress(0, 10), 0.0);
        assert_eq!(frame_progress(9, 10), 1.0);
        assert_eq!(frame_progress(0, 1), 1.0);
    }
}
