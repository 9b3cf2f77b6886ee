//! Text-only screens over the background: the opening hook and the closing
//! call to action.

use crate::scene::Scene;
use crate::text::{Palette, TextBlock, TextStyle};
use crate::video::Frame;

const HOOK_SIZE: f32 = 82.0;
const HOOK_CHARS: usize = 9;
const HOOK_SPACING: u32 = 40;
const HOOK_LIFT: i64 = 40;

const CLOSING_SIZE: f32 = 82.0;
const CLOSING_SPACING: u32 = 44;
const SUBLINE_SIZE: f32 = 72.0;
const SUBLINE_GAP: i64 = 20;
const CLOSING_LIFT: i64 = 20;
const CLOSING_BLINK_SEC: f64 = 0.4;

const MIN_TOP: i64 = 80;
const STROKE: u32 = 2;

impl Scene {
    fn palette(&self) -> Palette {
        Palette {
            fill: self.copy.text_color,
            highlight: self.copy.highlight_color,
            stroke: self.copy.stroke_color,
        }
    }

    /// Empathy message with highlighted keywords, or the bare background
    /// when there is none
    pub(crate) fn hook_frame(&mut self) -> Frame {
        let mut frame = self.assets.blank();
        let Some(message) = self.hook_message.as_deref().filter(|m| !m.trim().is_empty()) else {
            return frame;
        };

        let block = TextBlock::wrapped(message, HOOK_CHARS, HOOK_SIZE)
            .with_spacing(HOOK_SPACING)
            .with_keywords(&self.copy.keywords);
        let top = TextBlock::centered_top(self.size.1, block.height(&self.painter), HOOK_LIFT, MIN_TOP);
        let palette = self.palette();
        block.draw(&mut self.painter, &mut frame, top, &palette, STROKE);
        frame
    }

    /// Whether the closing word is lit on frame `index`
    pub(crate) fn blink_on(&self, index: usize) -> bool {
        (index / self.blink_period(CLOSING_BLINK_SEC)) % 2 == 0
    }

    pub(crate) fn closing_frame(&mut self, lit: bool) -> Frame {
        let mut frame = self.assets.blank();
        let mut block = TextBlock::new(self.copy.closing_lines.clone(), CLOSING_SIZE).with_spacing(CLOSING_SPACING);
        if lit {
            block = block.with_word_color(&self.copy.blink_word, self.copy.blink_color);
        }

        let sub_h = self.painter.line_height(SUBLINE_SIZE);
        let total = block.height(&self.painter) + sub_h + SUBLINE_GAP as u32;
        let top = TextBlock::centered_top(self.size.1, total, CLOSING_LIFT, MIN_TOP);

        let palette = self.palette();
        let bottom = block.draw(&mut self.painter, &mut frame, top, &palette, STROKE);

        let style = TextStyle::new(SUBLINE_SIZE, self.copy.text_color).with_stroke(self.copy.stroke_color, STROKE);
        let y = bottom + CLOSING_SPACING as i64 + SUBLINE_GAP;
        self.painter.draw_centered(&mut frame, &self.copy.closing_subline, y, &style);
        frame
    }
}
