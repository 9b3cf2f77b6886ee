//! # Audio Sync Module
//!
//! Loads the background music, finds its most energetic stretch and cuts a
//! clip of exactly the video's length from it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tarot_reel::audio::{build_audio, find_highlight_start, AudioLoader};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let track = AudioLoader::load("song.mp3").await?;
//! let offset = find_highlight_start(&track, 36.0, 2.0);
//! let clip = build_audio(&track, 36.0, offset)?;
//! clip.write_wav("clip.wav")?;
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod loader;
pub mod sync;
pub mod types;

pub use analyzer::{find_highlight_start, AudioAnalyzer, EnergyWindow};
pub use loader::AudioLoader;
pub use sync::build_audio;
pub use types::AudioData;
