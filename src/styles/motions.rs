//! The four built-in shuffle motion families.
//!
//! Angles are in degrees. Every family mixes a per-card phase with a
//! sinusoidally modulated radius so no two cards share a trajectory.

use crate::styles::traits::ShuffleMotion;

fn deg(angle: f64) -> f64 {
    angle.to_radians()
}

/// Elliptical orbits whose speed depends on the card's column and row
#[derive(Debug, Clone, Default)]
pub struct ChaosOrbit;

impl ShuffleMotion for ChaosOrbit {
    fn id(&self) -> &str {
        "chaos_orbit"
    }

    fn name(&self) -> &str {
        "혼돈 궤도"
    }

    fn description(&self) -> &str {
        "Cards orbit the center on flattened ellipses with breathing radii"
    }

    fn offset(&self, t: f64, i: usize) -> (f64, f64) {
        let i_f = i as f64;
        let speed = 90.0 + (i % 3) as f64 * 40.0 + (i / 3) as f64 * 25.0;
        let angle = deg(t * speed + i_f * 42.0);
        let r = 120.0 + 80.0 * (t * 2.1 + i_f * 0.7).sin();
        (r * angle.sin(), -r * 0.6 * angle.cos())
    }
}

/// Two counter-rotating circles summed per card
#[derive(Debug, Clone, Default)]
pub struct ScatterSwirl;

impl ShuffleMotion for ScatterSwirl {
    fn id(&self) -> &str {
        "scatter_swirl"
    }

    fn name(&self) -> &str {
        "흩어짐 소용돌이"
    }

    fn description(&self) -> &str {
        "Cards scatter and swirl on two interfering rotations"
    }

    fn offset(&self, t: f64, i: usize) -> (f64, f64) {
        let i_f = i as f64;
        let a1 = deg(t * 120.0 + i_f * 50.0);
        let a2 = deg(t * 90.0 - i_f * 35.0);
        let r1 = 100.0 + 60.0 * (t * 1.5 + i_f).sin();
        let r2 = 80.0 + 50.0 * (t * 1.2 + i_f * 0.8).cos();
        (
            r1 * a1.sin() + r2 * 0.5 * a2.cos(),
            -r1 * 0.7 * a1.cos() + r2 * 0.4 * a2.sin(),
        )
    }
}

/// Lissajous-style bouncing with a slow wobble
#[derive(Debug, Clone, Default)]
pub struct BounceMix;

impl ShuffleMotion for BounceMix {
    fn id(&self) -> &str {
        "bounce_mix"
    }

    fn name(&self) -> &str {
        "튀어오름 섞기"
    }

    fn description(&self) -> &str {
        "Cards bounce across the table at per-card frequencies"
    }

    fn offset(&self, t: f64, i: usize) -> (f64, f64) {
        let i_f = i as f64;
        let vx = 180.0 + ((i * 37) % 140) as f64;
        let vy = 150.0 + ((i * 29) % 120) as f64;
        let wobble_x = 100.0 * (t * 0.9 + i_f * 0.6).sin();
        let wobble_y = 90.0 * (t * 1.1 + i_f * 0.5).cos();
        (
            180.0 * deg(t * vx).sin() + wobble_x,
            -160.0 * deg(t * vy).cos() + wobble_y,
        )
    }
}

/// Spiral in and out with a radial jitter
#[derive(Debug, Clone, Default)]
pub struct SpiralChaos;

impl ShuffleMotion for SpiralChaos {
    fn id(&self) -> &str {
        "spiral_chaos"
    }

    fn name(&self) -> &str {
        "나선 혼돈"
    }

    fn description(&self) -> &str {
        "Cards spiral around the center while the radius pulses"
    }

    fn offset(&self, t: f64, i: usize) -> (f64, f64) {
        let i_f = i as f64;
        let angle = deg(t * (100.0 + i_f * 15.0) + i_f * 40.0);
        let r = 80.0 + 100.0 * (0.5 + 0.5 * (t * 2.5 + i_f * 0.9).sin());
        let dr = 30.0 * (t * 3.0 + i_f * 1.2).sin();
        ((r + dr) * angle.sin(), -(r + dr) * 0.7 * angle.cos())
    }
}
