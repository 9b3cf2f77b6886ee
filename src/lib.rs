//! # Tarot Reel
//!
//! Procedural tarot card-reading short videos: shuffle animations, card
//! reveals and reading screens synchronized to the loudest stretch of a music
//! track.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tarot_reel::{
//!     composition::{RenderEngine, RenderRequest},
//!     config::Config,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = RenderEngine::new(Config::default());
//! let request = RenderRequest {
//!     output: "output/reading.mp4".into(),
//!     theme: "총운".to_string(),
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let result = engine.render(&request).await?;
//! println!("{} cards: {:?}", result.num_cards, result.card_names);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`cards`] - Decks, theme pools, card selection and the card catalog
//! - [`composition`] - Timing plans, render plans and the render engine
//! - [`scene`] - Frame generators for every timeline section
//! - [`styles`] - Shuffle motion families and easing curves
//! - [`text`] - Wrapping, keyword highlights and text rasterization
//! - [`audio`] - Music loading, highlight detection and clip construction
//! - [`video`] - Frames, frame sinks and ffmpeg encoding
//! - [`config`] - Configuration management
//!
//! ## Custom Copy
//!
//! Card interpretations and the empathy hook come from a
//! [`CopyWriter`](cards::CopyWriter). Plug in your own to replace the
//! built-in catalog text:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tarot_reel::{cards::CopyWriter, composition::RenderEngine, config::Config};
//!
//! struct Shouty;
//!
//! impl CopyWriter for Shouty {
//!     fn card_interpretations(&self, cards: &[usize], _theme: &str, _hook: Option<&str>) -> Vec<String> {
//!         cards.iter().map(|c| format!("CARD {}!", c)).collect()
//!     }
//!
//!     fn empathy_message(&self, hook: &str) -> String {
//!         hook.to_uppercase()
//!     }
//! }
//!
//! let engine = RenderEngine::new(Config::default()).with_copy_writer(Arc::new(Shouty));
//! ```

pub mod assets;
pub mod audio;
pub mod cards;
pub mod composition;
pub mod config;
pub mod error;
pub mod scene;
pub mod styles;
pub mod text;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    cards::CopyWriter,
    composition::{Mode, RenderEngine, RenderPlan, RenderRequest, RenderResult, Section, TimingPlan},
    config::Config,
    error::{RenderError, Result},
    styles::{ShuffleStyle, StyleRegistry},
};
