//! # Text Module
//!
//! Line wrapping (by character count or rendered width), keyword
//! highlighting, font resolution and glyph rasterization onto frames.

pub mod block;
pub mod font;
pub mod highlight;
pub mod painter;
pub mod wrap;

pub use block::{Palette, TextBlock};
pub use font::{FontFace, GlyphBitmap, SizedFont};
pub use highlight::{highlight, keyword_ranges, Segment};
pub use painter::{TextPainter, TextStyle};
pub use wrap::{wrap, wrap_to_width, TextMeasure};
