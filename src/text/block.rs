use std::collections::HashMap;

use crate::text::highlight::highlight;
use crate::text::painter::TextPainter;
use crate::text::wrap::{wrap, wrap_to_width, TextMeasure};
use crate::video::Frame;

/// Colors used when drawing a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fill: [u8; 3],
    pub highlight: [u8; 3],
    pub stroke: [u8; 3],
}

/// Multi-line text laid out as one centered block
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub size: f32,
    /// Extra pixels between consecutive lines
    pub line_spacing: u32,
    pub keywords: Vec<String>,
    /// Per-character colors keyed by (line, char index)
    pub overrides: HashMap<(usize, usize), [u8; 3]>,
}

impl TextBlock {
    pub fn new(lines: Vec<String>, size: f32) -> Self {
        Self { lines, size, ..Default::default() }
    }

    /// Block from free text wrapped at `max_chars` characters per line
    pub fn wrapped(text: &str, max_chars: usize, size: f32) -> Self {
        Self::new(wrap(text, max_chars), size)
    }

    /// Block from free text wrapped so every line fits `max_width` pixels
    pub fn fitted<M: TextMeasure + ?Sized>(text: &str, max_width: u32, size: f32, measure: &M) -> Self {
        Self::new(wrap_to_width(text, max_width, measure), size)
    }

    pub fn with_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_keywords(mut self, keywords: &[String]) -> Self {
        self.keywords = keywords.to_vec();
        self
    }

    /// Color every occurrence of `word` with `color`
    pub fn with_word_color(mut self, word: &str, color: [u8; 3]) -> Self {
        let word_len = word.chars().count();
        if word_len == 0 {
            return self;
        }
        for (line_idx, line) in self.lines.iter().enumerate() {
            for (byte, _) in line.match_indices(word) {
                let first = line[..byte].chars().count();
                for ch in first..first + word_len {
                    self.overrides.insert((line_idx, ch), color);
                }
            }
        }
        self
    }

    /// Line `line_idx` split into runs of one color each.
    ///
    /// Per-character overrides win over keyword highlights, which win over
    /// the plain fill.
    pub fn colored_runs(&self, line_idx: usize, fill: [u8; 3], highlight_color: [u8; 3]) -> Vec<(String, [u8; 3])> {
        let Some(line) = self.lines.get(line_idx) else {
            return Vec::new();
        };

        let mut runs: Vec<(String, [u8; 3])> = Vec::new();
        let mut ch = 0;
        for segment in highlight(line, &self.keywords) {
            let base = if segment.highlighted { highlight_color } else { fill };
            for c in segment.text.chars() {
                let color = self.overrides.get(&(line_idx, ch)).copied().unwrap_or(base);
                match runs.last_mut() {
                    Some((text, last)) if *last == color => text.push(c),
                    _ => runs.push((c.to_string(), color)),
                }
                ch += 1;
            }
        }
        runs
    }

    /// Total height of all lines plus the spacing between them
    pub fn height(&self, painter: &TextPainter) -> u32 {
        if self.lines.is_empty() {
            return 0;
        }
        let line_h = painter.line_height(self.size);
        line_h * self.lines.len() as u32 + self.line_spacing * (self.lines.len() as u32 - 1)
    }

    /// Top y that centers a block of `total_height` vertically, lifted by
    /// `lift` pixels and never above `min_top`
    pub fn centered_top(frame_height: u32, total_height: u32, lift: i64, min_top: i64) -> i64 {
        ((frame_height as i64 - total_height as i64) / 2 - lift).max(min_top)
    }

    /// Draw every line centered horizontally starting at `y`; returns the y
    /// just below the last line
    pub fn draw(&self, painter: &mut TextPainter, frame: &mut Frame, y: i64, palette: &Palette, stroke_width: u32) -> i64 {
        self.draw_shifted(painter, frame, 0, y, palette, stroke_width)
    }

    /// [`TextBlock::draw`] with every line moved `dx` pixels right of center
    pub fn draw_shifted(
        &self,
        painter: &mut TextPainter,
        frame: &mut Frame,
        dx: i64,
        y: i64,
        palette: &Palette,
        stroke_width: u32,
    ) -> i64 {
        let line_h = painter.line_height(self.size) as i64;
        let stroke = (stroke_width > 0).then_some((palette.stroke, stroke_width));

        let mut y = y;
        for (idx, line) in self.lines.iter().enumerate() {
            let runs = self.colored_runs(idx, palette.fill, palette.highlight);
            let width = painter.measure(line, self.size) as i64;
            let x = (frame.width() as i64 - width) / 2 + dx;
            painter.draw_runs(frame, &runs, x, y, self.size, stroke);

            y += line_h;
            if idx + 1 < self.lines.len() {
                y += self.line_spacing as i64;
            }
        }
        y
    }
}
