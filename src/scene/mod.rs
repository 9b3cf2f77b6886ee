//! # Scene Module
//!
//! Frame generators for every timeline section. A [`Scene`] is built once
//! per render from a [`RenderPlan`]: it owns the decoded card images, the
//! background and the text painter, and draws any frame of any section on
//! demand.

pub mod assets;
pub mod board;
pub mod captions;
pub mod flip;
pub mod layout;
pub mod reading;

use tracing::debug;

use crate::composition::{Mode, RenderPlan, Section, SectionKind};
use crate::config::{CopyConfig, LayoutConfig};
use crate::error::Result;
use crate::styles::ShuffleStyle;
use crate::text::TextPainter;
use crate::video::{Frame, FrameSink};

pub use assets::{load_background, load_rgb, SceneAssets};
pub use flip::{flip_state, paste_squeezed, staggered_progress, FlipState};
pub use layout::{GridLayout, ReadingLayout, READING_ROWS};

/// Everything needed to draw the frames of one render
pub struct Scene {
    size: (u32, u32),
    fps: u32,
    mode: Mode,
    grid: GridLayout,
    reading: ReadingLayout,
    assets: SceneAssets,
    painter: TextPainter,
    layout: LayoutConfig,
    copy: CopyConfig,
    background_rgb: [u8; 3],
    /// Cards in the order they are first shown face-up
    revealed: Vec<usize>,
    /// Cards in grid order after the shuffle
    arranged: Vec<usize>,
    style: ShuffleStyle,
    hook_message: Option<String>,
}

impl Scene {
    /// Decode the plan's images and set up layouts. All file I/O of the
    /// frame-generation phase happens here.
    pub fn prepare(plan: &RenderPlan) -> Result<Self> {
        let size = (plan.video.width, plan.video.height);
        let count = plan.selection.len();
        let grid = GridLayout::new(count, size, &plan.layout);
        let reading = ReadingLayout::new(size.1, &plan.layout);

        let background = load_background(plan.background.as_deref(), size, plan.background_color);
        let assets = SceneAssets::load(
            &plan.deck,
            &plan.selection.cards,
            background,
            grid.cell_size(),
            reading.card_size(),
        )?;

        debug!(
            "Scene ready: {}x{} grid cells {}x{}, reading cards {}x{}",
            size.0, size.1, grid.cell_w, grid.cell_h, reading.card_w, reading.card_h
        );

        Ok(Self {
            size,
            fps: plan.video.fps,
            mode: plan.mode,
            grid,
            reading,
            assets,
            painter: TextPainter::new(plan.font.clone()),
            layout: plan.layout.clone(),
            copy: plan.copy.clone(),
            background_rgb: plan.background_color,
            revealed: plan.selection.cards_in_display_order(),
            arranged: plan.selection.cards_after_shuffle(),
            style: plan.style.clone(),
            hook_message: plan.empathy_message.clone(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Write all `frames` frames of `section` into `sink`
    pub fn render_section(&mut self, section: Section, frames: usize, sink: &mut dyn FrameSink) -> Result<()> {
        match section.kind() {
            SectionKind::Static => {
                let frame = self.render_frame(section, 0, frames);
                sink.push_repeated(&frame, frames)
            }
            SectionKind::Animated if section == Section::Closing => self.render_closing(frames, sink),
            SectionKind::Animated => {
                for index in 0..frames {
                    let frame = self.render_frame(section, index, frames);
                    sink.push(&frame)?;
                }
                Ok(())
            }
        }
    }

    /// Frame `index` of a section that lasts `frames` frames
    pub fn render_frame(&mut self, section: Section, index: usize, frames: usize) -> Frame {
        match section {
            Section::Hook => self.hook_frame(),
            Section::CardsFace => self.face_reveal_frame(index, frames),
            Section::GatherToCenter => self.gather_frame(index),
            Section::Shuffle => self.shuffle_frame(index, frames),
            Section::ArrangeMove => self.arrange_frame(index),
            Section::ArrangeFacedown => self.facedown_frame(),
            Section::ArrangeFaceup => self.faceup_frame(index, frames),
            Section::FlipHold => self.hold_frame(),
            Section::Cards1To3 => self.reading_frame(0),
            Section::SegmentTransition => self.transition_frame(crate::styles::frame_progress(index, frames)),
            Section::Cards4To6 => self.reading_frame(1),
            Section::Closing => {
                let on = self.blink_on(index);
                self.closing_frame(on)
            }
        }
    }

    fn render_closing(&mut self, frames: usize, sink: &mut dyn FrameSink) -> Result<()> {
        let lit = self.closing_frame(true);
        let unlit = self.closing_frame(false);
        for index in 0..frames {
            sink.push(if self.blink_on(index) { &lit } else { &unlit })?;
        }
        Ok(())
    }

    /// Frames per blink phase of `seconds`
    fn blink_period(&self, seconds: f64) -> usize {
        ((self.fps as f64 * seconds) as usize).max(1)
    }
}
