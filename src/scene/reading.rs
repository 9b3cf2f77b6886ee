//! Reading screens: three card rows with labels, and the animated handoff
//! between two groups of rows.

use crate::cards::CardCatalog;
use crate::scene::flip::paste_squeezed;
use crate::scene::layout::READING_ROWS;
use crate::scene::Scene;
use crate::styles::Ease;
use crate::text::TextStyle;
use crate::video::{lerp_color, Frame};

const NUMBER_SIZE: f32 = 65.0;
const NUMBER_INSET: i64 = 10;
const LABEL_SIZE: f32 = 49.0;
const VALUE_SIZE: f32 = 47.0;
const DETAIL_SIZE: f32 = 43.0;
const TEXT_STROKE: u32 = 2;
const MEANING_CHARS: usize = 18;

const LABEL_ADVANCE: i64 = 8;
const DETAIL_GAP: i64 = 24;
const DETAIL_ADVANCE: i64 = 4;

/// End of the outgoing phase and start of the incoming phase
const OUT_END: f64 = 0.45;
const IN_START: f64 = 0.55;
const MIN_VISIBLE_SCALE: f64 = 0.02;
const MIN_VISIBLE_ALPHA: f64 = 0.02;

/// One moment of a segment transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPhase {
    /// Horizontal card scale
    pub card_scale: f64,
    /// Which image the cards show
    pub card_face: CardFace,
    /// True once the numbers belong to the incoming segment
    pub incoming_numbers: bool,
    /// Outgoing text as (alpha, x offset)
    pub outgoing_text: Option<(f64, f64)>,
    /// Incoming text as (alpha, x offset)
    pub incoming_text: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Outgoing,
    Back,
    Incoming,
}

/// Phase at eased progress `p`, with text sliding `slide` pixels
pub fn transition_phase(p: f64, slide: f64) -> TransitionPhase {
    let p = p.clamp(0.0, 1.0);
    let (card_scale, card_face) = if p < OUT_END {
        (1.0 - p / OUT_END, CardFace::Outgoing)
    } else if p > IN_START {
        ((p - IN_START) / (1.0 - IN_START), CardFace::Incoming)
    } else {
        (1.0, CardFace::Back)
    };

    let outgoing_text = (p < OUT_END).then(|| {
        let local = p / OUT_END;
        (1.0 - local, -slide * local)
    });
    let incoming_text = (p > IN_START).then(|| {
        let local = (p - IN_START) / (1.0 - IN_START);
        (local, slide * (1.0 - local))
    });

    TransitionPhase {
        card_scale,
        card_face,
        incoming_numbers: p > IN_START,
        outgoing_text: outgoing_text.filter(|(alpha, _)| *alpha > MIN_VISIBLE_ALPHA),
        incoming_text: incoming_text.filter(|(alpha, _)| *alpha > MIN_VISIBLE_ALPHA),
    }
}

impl Scene {
    /// Cards of reading segment `segment` and the number of the first one
    fn segment(&self, segment: usize) -> (Vec<usize>, usize) {
        let first = segment * READING_ROWS;
        let cards = self.arranged.iter().skip(first).take(READING_ROWS).copied().collect();
        (cards, first)
    }

    pub(crate) fn reading_frame(&mut self, segment: usize) -> Frame {
        let (cards, first) = self.segment(segment);
        let mut frame = self.assets.blank();
        for (row, &card) in cards.iter().enumerate() {
            let y = self.reading.row_y(row);
            frame.paste(self.assets.reading_face(card), self.reading.card_x, y);
            self.draw_row_number(&mut frame, row, first + row + 1);
            self.draw_row_text(&mut frame, row, card, 1.0, 0);
        }
        frame
    }

    /// Frame of the handoff from segment 0 to segment 1 at linear progress
    /// `progress`
    pub(crate) fn transition_frame(&mut self, progress: f64) -> Frame {
        let phase = transition_phase(Ease::InOutQuad.apply(progress), self.layout.slide_distance as f64);
        let (outgoing, out_first) = self.segment(0);
        let (incoming, in_first) = self.segment(1);
        let mut frame = self.assets.blank();

        let (rows, first) = if phase.incoming_numbers { (&incoming, in_first) } else { (&outgoing, out_first) };
        for (row, &card) in rows.iter().enumerate() {
            let y = self.reading.row_y(row);
            let image = match phase.card_face {
                CardFace::Back => self.assets.reading_back(),
                _ => self.assets.reading_face(card),
            };
            if phase.card_scale >= MIN_VISIBLE_SCALE {
                paste_squeezed(&mut frame, image, self.reading.card_x, y, phase.card_scale, MIN_VISIBLE_SCALE);
            }
            self.draw_row_number(&mut frame, row, first + row + 1);
        }

        if let Some((alpha, dx)) = phase.outgoing_text {
            for (row, &card) in outgoing.iter().enumerate() {
                self.draw_row_text(&mut frame, row, card, alpha, dx as i64);
            }
        }
        if let Some((alpha, dx)) = phase.incoming_text {
            for (row, &card) in incoming.iter().enumerate() {
                self.draw_row_text(&mut frame, row, card, alpha, dx as i64);
            }
        }
        frame
    }

    fn draw_row_number(&mut self, frame: &mut Frame, row: usize, number: usize) {
        let style = TextStyle::new(NUMBER_SIZE, self.copy.text_color).with_stroke(self.copy.stroke_color, TEXT_STROKE);
        let x = self.reading.card_x + NUMBER_INSET;
        let y = self.reading.row_y(row) + NUMBER_INSET;
        self.painter.draw_text(frame, &number.to_string(), x, y, &style);
    }

    /// Labels of one reading row, faded toward the background by `alpha`
    /// and moved `dx` pixels horizontally
    fn draw_row_text(&mut self, frame: &mut Frame, row: usize, card: usize, alpha: f64, dx: i64) {
        let info = CardCatalog::info(card);
        let short = CardCatalog::short_meaning(card, MEANING_CHARS);
        let plain = lerp_color(self.background_rgb, self.copy.text_color, alpha);
        let gold = lerp_color(self.background_rgb, self.copy.highlight_color, alpha);
        let stroke = self.copy.stroke_color;

        let suffix = &self.copy.value_suffix;
        let lines = [
            (self.copy.name_label.clone(), LABEL_SIZE, plain),
            (format!("{}{}", info.name, suffix), VALUE_SIZE, gold),
            (self.copy.meaning_label.clone(), LABEL_SIZE, plain),
            (format!("{}{}", short, suffix), VALUE_SIZE, gold),
        ];

        let x = self.reading.text_x + dx;
        let mut y = self.reading.row_y(row);
        for (text, size, fill) in lines.iter() {
            let style = TextStyle::new(*size, *fill).with_stroke(stroke, TEXT_STROKE);
            self.painter.draw_text(frame, text, x, y, &style);
            y += self.painter.line_height(*size) as i64 + LABEL_ADVANCE;
        }

        y += DETAIL_GAP;
        let style = TextStyle::new(DETAIL_SIZE, plain).with_stroke(stroke, TEXT_STROKE);
        for line in &self.copy.detail_lines {
            self.painter.draw_text(frame, line, x, y, &style);
            y += self.painter.line_height(DETAIL_SIZE) as i64 + DETAIL_ADVANCE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Mode, Section};
    use crate::scene::tests::small_plan;

    #[test]
    fn test_transition_phases() {
        let start = transition_phase(0.0, 450.0);
        assert_eq!(start.card_face, CardFace::Outgoing);
        assert_eq!(start.card_scale, 1.0);
        assert_eq!(start.outgoing_text, Some((1.0, 0.0)));
        assert!(start.incoming_text.is_none());

        let hold = transition_phase(0.5, 450.0);
        assert_eq!(hold.card_face, CardFace::Back);
        assert!(hold.outgoing_text.is_none() && hold.incoming_text.is_none());
        assert!(!hold.incoming_numbers);

        let end = transition_phase(1.0, 450.0);
        assert_eq!(end.card_face, CardFace::Incoming);
        assert_eq!(end.card_scale, 1.0);
        assert_eq!(end.incoming_text, Some((1.0, 0.0)));
        assert!(end.incoming_numbers);
    }

    #[test]
    fn test_text_slides_out_left_and_in_from_right() {
        let out = transition_phase(0.225, 400.0).outgoing_text.unwrap();
        assert!((out.0 - 0.5).abs() < 1e-9);
        assert!((out.1 + 200.0).abs() < 1e-9);

        let incoming = transition_phase(0.775, 400.0).incoming_text.unwrap();
        assert!((incoming.0 - 0.5).abs() < 1e-9);
        assert!((incoming.1 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_faint_text_is_skipped() {
        assert!(transition_phase(0.445, 450.0).outgoing_text.is_none());
        assert!(transition_phase(0.556, 450.0).incoming_text.is_none());
    }

    #[test]
    fn test_transition_ends_on_second_segment() {
        let dir = tempfile::tempdir().unwrap();
        let plan = small_plan(dir.path(), Mode::Full);
        let mut scene = Scene::prepare(&plan).unwrap();

        let first = scene.render_frame(Section::Cards1To3, 0, 1);
        let second = scene.render_frame(Section::Cards4To6, 0, 1);
        assert_ne!(first, second);
        assert_eq!(scene.transition_frame(0.0), first);
        assert_eq!(scene.transition_frame(1.0), second);
    }

    #[test]
    fn test_short_mode_has_one_segment() {
        let dir = tempfile::tempdir().unwrap();
        let plan = small_plan(dir.path(), Mode::Short);
        let scene = Scene::prepare(&plan).unwrap();
        assert_eq!(scene.segment(0).0.len(), 3);
        assert!(scene.segment(1).0.is_empty());
    }
}
