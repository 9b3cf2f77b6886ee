use std::collections::HashMap;
use std::sync::Arc;

use crate::text::font::{FontFace, GlyphBitmap};
use crate::video::Frame;

/// Fill color plus optional outline drawn behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub fill: [u8; 3],
    /// Outline color and radius in pixels
    pub stroke: Option<([u8; 3], u32)>,
}

impl TextStyle {
    pub fn new(size: f32, fill: [u8; 3]) -> Self {
        Self { size, fill, stroke: None }
    }

    pub fn with_stroke(mut self, color: [u8; 3], width: u32) -> Self {
        self.stroke = Some((color, width));
        self
    }
}

/// Rasterizes text onto frames, caching glyph bitmaps per (char, size)
pub struct TextPainter {
    font: Arc<FontFace>,
    glyph_cache: HashMap<(char, u32), GlyphBitmap>,
}

impl TextPainter {
    pub fn new(font: Arc<FontFace>) -> Self {
        Self { font, glyph_cache: HashMap::new() }
    }

    pub fn font(&self) -> &FontFace {
        &self.font
    }

    pub fn measure(&self, text: &str, size: f32) -> u32 {
        self.font.text_width(text, size)
    }

    pub fn line_height(&self, size: f32) -> u32 {
        self.font.line_height(size).round().max(1.0) as u32
    }

    fn glyph(&mut self, c: char, size: f32) -> &GlyphBitmap {
        let font = &self.font;
        self.glyph_cache
            .entry((c, size.to_bits()))
            .or_insert_with(|| font.rasterize(c, size))
    }

    /// Draw one line with its line box's top-left corner at `(x, y)`.
    /// Returns the x coordinate after the last glyph.
    pub fn draw_text(&mut self, frame: &mut Frame, text: &str, x: i64, y: i64, style: &TextStyle) -> i64 {
        let runs = [(text, style.fill)];
        self.draw_runs(frame, &runs, x, y, style.size, style.stroke)
    }

    /// Draw differently colored runs of one line back to back.
    ///
    /// The outline of the whole line is laid down before any fill so a
    /// run's outline never covers its neighbour's glyphs.
    pub fn draw_runs<S: AsRef<str>>(
        &mut self,
        frame: &mut Frame,
        runs: &[(S, [u8; 3])],
        x: i64,
        y: i64,
        size: f32,
        stroke: Option<([u8; 3], u32)>,
    ) -> i64 {
        let baseline = y + self.font.ascent(size).round() as i64;

        if let Some((color, width)) = stroke {
            let offsets = stroke_offsets(width);
            let mut pen = x as f32;
            for (text, _) in runs {
                for c in text.as_ref().chars() {
                    let glyph = self.glyph(c, size);
                    for &(dx, dy) in &offsets {
                        blend_glyph(frame, glyph, pen.round() as i64 + dx, baseline + dy, color);
                    }
                    pen += glyph.advance;
                }
            }
        }

        let mut pen = x as f32;
        for (text, color) in runs {
            for c in text.as_ref().chars() {
                let glyph = self.glyph(c, size);
                blend_glyph(frame, glyph, pen.round() as i64, baseline, *color);
                pen += glyph.advance;
            }
        }
        pen.round() as i64
    }

    /// Draw `text` horizontally centered on the frame
    pub fn draw_centered(&mut self, frame: &mut Frame, text: &str, y: i64, style: &TextStyle) {
        let x = (frame.width() as i64 - self.measure(text, style.size) as i64) / 2;
        self.draw_text(frame, text, x, y, style);
    }
}

fn stroke_offsets(width: u32) -> Vec<(i64, i64)> {
    let w = width as i64;
    let mut offsets = Vec::new();
    for dy in -w..=w {
        for dx in -w..=w {
            if (dx, dy) != (0, 0) && dx * dx + dy * dy <= w * w {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

fn blend_glyph(frame: &mut Frame, glyph: &GlyphBitmap, pen_x: i64, baseline: i64, color: [u8; 3]) {
    let left = pen_x + glyph.xmin as i64;
    let top = baseline + glyph.top as i64;
    for row in 0..glyph.height {
        for col in 0..glyph.width {
            let mask = glyph.coverage[row * glyph.width + col];
            if mask > 0 {
                frame.blend_pixel(left + col as i64, top + row as i64, color, mask);
            }
        }
    }
}
