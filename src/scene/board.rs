//! Grid sections: face reveal, gather, shuffle, deal, pick screen, staggered
//! reveal and the numbered hold.

use crate::composition::{frame_count, Mode};
use crate::scene::flip::{flip_state, paste_squeezed, staggered_progress};
use crate::scene::Scene;
use crate::styles::{frame_progress, Ease};
use crate::text::{Palette, TextBlock, TextStyle};
use crate::video::Frame;

const CAPTION_SIZE: f32 = 72.0;
const CAPTION_STROKE: u32 = 3;
const CAPTION_BLINK_SEC: f64 = 0.5;

/// Longest the face-up cards stay still before flipping
const FACE_SHOW_SEC: f64 = 3.0;
/// Shortest flip at the end of the reveal
const FACE_FLIP_MIN_SEC: f64 = 1.0;

const MIN_FLIP_SCALE: f64 = 0.05;

const BADGE_NUMBER_SIZE: f32 = 48.0;
const BADGE_OUTLINE: [u8; 3] = [218, 165, 32];
const PICK_BADGE_FILL: [u8; 3] = [139, 69, 19];
const PICK_BADGE_TOP: i64 = 20;
const PICK_BADGE_OUTLINE_W: u32 = 3;
const HOLD_BADGE_FILL: [u8; 3] = [44, 24, 16];
const HOLD_BADGE_TOP: i64 = 18;
const HOLD_BADGE_OUTLINE_W: u32 = 4;

const PICK_SIZE_SHORT: f32 = 96.0;
const PICK_SIZE_FULL: f32 = 88.0;
const PICK_LINE_GAP: u32 = 12;
const PICK_SHADOW: i64 = 3;
const PICK_MIN_TOP: i64 = 80;
const PICK_FULL_TOP: f64 = 0.26;
const PICK_MAX_WIDTH: f64 = 0.9;

/// Frames of a reveal section spent showing the faces still; the rest flip.
///
/// The flip keeps at least one second whenever the section is long enough.
pub fn face_show_frames(frames: usize, fps: u32) -> usize {
    let past_show = frames.saturating_sub(frame_count(fps, FACE_SHOW_SEC));
    let flip = frames.min(frame_count(fps, FACE_FLIP_MIN_SEC).max(past_show));
    frames - flip
}

/// Position of a card moving from `from` to `to`, departing at
/// `index * delay` seconds and arriving `span` seconds later
pub fn staggered_travel(from: (i64, i64), to: (i64, i64), t: f64, index: usize, delay: f64, span: f64) -> (i64, i64) {
    let start = index as f64 * delay;
    if t <= start {
        return from;
    }
    if t >= start + span {
        return to;
    }
    let p = Ease::OutQuad.apply((t - start) / span);
    (
        (from.0 as f64 + (to.0 - from.0) as f64 * p) as i64,
        (from.1 as f64 + (to.1 - from.1) as f64 * p) as i64,
    )
}

/// Look of the numbered discs on one grid screen
struct Badge {
    diameter: u32,
    top: i64,
    fill: [u8; 3],
    outline_width: u32,
    number_stroke: Option<([u8; 3], u32)>,
}

impl Scene {
    fn blank(&self) -> Frame {
        self.assets.blank()
    }

    pub(crate) fn face_reveal_frame(&mut self, index: usize, frames: usize) -> Frame {
        let mut frame = self.blank();
        let show = face_show_frames(frames, self.fps);

        if index < show {
            for (slot, &card) in self.revealed.iter().enumerate() {
                let (x, y) = self.grid.cell_origin(slot);
                frame.paste(self.assets.grid_face(card), x, y);
            }
            if (index / self.blink_period(CAPTION_BLINK_SEC)) % 2 == 0 {
                let style = TextStyle::new(CAPTION_SIZE, self.copy.stroke_color)
                    .with_stroke(self.copy.text_color, CAPTION_STROKE);
                let h = self.painter.line_height(CAPTION_SIZE) as i64;
                let y = (self.size.1 as i64 - h) / 2;
                self.painter.draw_centered(&mut frame, &self.copy.face_caption, y, &style);
            }
            return frame;
        }

        let p = Ease::InOutQuad.apply(frame_progress(index - show, frames - show));
        let state = flip_state(p);
        for (slot, &card) in self.revealed.iter().enumerate() {
            let (x, y) = self.grid.cell_origin(slot);
            let image = if state.other_face { self.assets.grid_back() } else { self.assets.grid_face(card) };
            paste_squeezed(&mut frame, image, x, y, state.scale, MIN_FLIP_SCALE);
        }
        frame
    }

    pub(crate) fn gather_frame(&mut self, index: usize) -> Frame {
        let t = index as f64 / self.fps.max(1) as f64;
        let stagger = self.layout.gather_stagger as f64;
        let center = self.grid.center_origin();

        let mut frame = self.blank();
        for slot in 0..self.grid.count {
            let (x, y) = staggered_travel(self.grid.cell_origin(slot), center, t, slot, stagger, stagger);
            frame.paste(self.assets.grid_back(), x, y);
        }
        frame
    }

    pub(crate) fn shuffle_frame(&mut self, index: usize, frames: usize) -> Frame {
        let t = self.style.time_at(index, frames, self.fps);
        let card = self.grid.cell_size();

        let mut frame = self.blank();
        for slot in 0..self.grid.count {
            let (x, y) = self.style.card_position(t, slot, self.size, card);
            frame.paste(self.assets.grid_back(), x as i64, y as i64);
        }
        frame
    }

    pub(crate) fn arrange_frame(&mut self, index: usize) -> Frame {
        let t = index as f64 / self.fps.max(1) as f64;
        let stagger = self.layout.arrange_stagger as f64;
        let center = self.grid.center_origin();

        let mut frame = self.blank();
        for slot in 0..self.grid.count {
            let (x, y) = staggered_travel(center, self.grid.cell_origin(slot), t, slot, stagger, stagger);
            frame.paste(self.assets.grid_back(), x, y);
        }
        frame
    }

    pub(crate) fn facedown_frame(&mut self) -> Frame {
        let mut frame = self.blank();
        let badge = Badge {
            diameter: self.layout.pick_badge_diameter,
            top: PICK_BADGE_TOP,
            fill: PICK_BADGE_FILL,
            outline_width: PICK_BADGE_OUTLINE_W,
            number_stroke: None,
        };
        for slot in 0..self.grid.count {
            let (x, y) = self.grid.cell_origin(slot);
            frame.paste(self.assets.grid_back(), x, y);
            self.draw_badge(&mut frame, slot, &badge);
        }

        let (message, size) = match self.mode {
            Mode::Short => (self.copy.pick_message_short.clone(), PICK_SIZE_SHORT),
            Mode::Full => (self.copy.pick_message_full.clone(), PICK_SIZE_FULL),
        };
        let max_width = (self.size.0 as f64 * PICK_MAX_WIDTH) as u32;
        let block = TextBlock::fitted(&message, max_width, size, &self.painter.font().sized(size))
            .with_spacing(PICK_LINE_GAP);
        let top = match self.mode {
            Mode::Short => TextBlock::centered_top(self.size.1, block.height(&self.painter), 0, PICK_MIN_TOP),
            Mode::Full => (self.size.1 as f64 * PICK_FULL_TOP) as i64,
        };

        let shadow = self.copy.stroke_color;
        let shadow_palette = Palette { fill: shadow, highlight: shadow, stroke: shadow };
        let text = self.copy.text_color;
        let palette = Palette { fill: text, highlight: text, stroke: shadow };
        block.draw_shifted(&mut self.painter, &mut frame, PICK_SHADOW, top + PICK_SHADOW, &shadow_palette, 0);
        block.draw(&mut self.painter, &mut frame, top, &palette, 0);
        frame
    }

    pub(crate) fn faceup_frame(&mut self, index: usize, frames: usize) -> Frame {
        let p = Ease::InOutQuad.apply(frame_progress(index, frames));
        let stagger = self.layout.flip_stagger as f64;
        let span = self.layout.flip_span as f64;

        let mut frame = self.blank();
        for (slot, &card) in self.arranged.iter().enumerate() {
            let (x, y) = self.grid.cell_origin(slot);
            let state = flip_state(staggered_progress(p, slot, stagger, span));
            let image = if state.other_face { self.assets.grid_face(card) } else { self.assets.grid_back() };
            paste_squeezed(&mut frame, image, x, y, state.scale, MIN_FLIP_SCALE);
        }
        frame
    }

    pub(crate) fn hold_frame(&mut self) -> Frame {
        let mut frame = self.blank();
        let badge = Badge {
            diameter: self.layout.hold_badge_diameter,
            top: HOLD_BADGE_TOP,
            fill: HOLD_BADGE_FILL,
            outline_width: HOLD_BADGE_OUTLINE_W,
            number_stroke: Some((self.copy.stroke_color, CAPTION_STROKE)),
        };
        for slot in 0..self.arranged.len() {
            let card = self.arranged[slot];
            let (x, y) = self.grid.cell_origin(slot);
            frame.paste(self.assets.grid_face(card), x, y);
            self.draw_badge(&mut frame, slot, &badge);
        }
        frame
    }

    /// Numbered disc near the top of grid cell `slot`
    fn draw_badge(&mut self, frame: &mut Frame, slot: usize, badge: &Badge) {
        let (cell_x, cell_y) = self.grid.cell_origin(slot);
        let d = badge.diameter as i64;
        let x = cell_x + (self.grid.cell_w as i64 - d) / 2;
        let y = cell_y + badge.top;
        frame.draw_badge(x, y, badge.diameter, badge.fill, BADGE_OUTLINE, badge.outline_width);

        let label = (slot + 1).to_string();
        let tw = self.painter.measure(&label, BADGE_NUMBER_SIZE) as i64;
        let th = self.painter.line_height(BADGE_NUMBER_SIZE) as i64;
        let mut style = TextStyle::new(BADGE_NUMBER_SIZE, self.copy.text_color);
        style.stroke = badge.number_stroke;
        self.painter.draw_text(frame, &label, x + (d - tw) / 2, y + (d - th) / 2 - 2, &style);
    }
}
