//! # Composition Engine
//!
//! Turns a render request into a plan, renders the plan's sections in
//! timeline order and hands the frames and music clip to the encoder.

pub mod engine;
pub mod plan;
pub mod timeline;

pub use engine::{prepare_audio, render_frames, RenderEngine};
pub use plan::{RenderPlan, RenderRequest, RenderResult};
pub use timeline::{frame_count, FrameBatch, Mode, Section, SectionKind, TimingPlan};
