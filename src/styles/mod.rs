//! # Shuffle Style System
//!
//! Parametric motion families that move the card backs during the shuffle
//! section. One style is picked per video and applied to every shuffle frame.
//!
//! ## Built-in Styles
//!
//! - **chaos_orbit**: flattened elliptical orbits
//! - **scatter_swirl**: two interfering rotations
//! - **bounce_mix**: per-card bouncing frequencies
//! - **spiral_chaos**: pulsing spiral
//!
//! ## Usage
//!
//! ```rust
//! use tarot_reel::styles::StyleRegistry;
//!
//! let registry = StyleRegistry::new();
//! let style = registry.get_style("spiral_chaos").unwrap();
//! let (x, y) = style.card_position(0.5, 2, (1080, 1920), (280, 420));
//! assert!(x <= 1080 - 280 && y <= 1920 - 420);
//! ```

pub mod easing;
pub mod motions;
pub mod registry;
pub mod traits;

pub use easing::{frame_progress, Ease};
pub use motions::{BounceMix, ChaosOrbit, ScatterSwirl, SpiralChaos};
pub use registry::StyleRegistry;
pub use traits::{shuffle_position, ShuffleMotion, ShuffleStyle};
