//! # Video Module
//!
//! Frame buffers, frame sinks and the ffmpeg-backed encoder.

pub mod compositor;
pub mod sink;
pub mod types;

pub use compositor::{EncodedVideo, FfmpegSink, VideoCompositor};
pub use sink::{CollectingSink, CountingSink, FrameSink};
pub use types::{lerp_color, Frame, VideoParams};
