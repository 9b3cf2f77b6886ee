use std::fmt;
use std::sync::Arc;

use crate::styles::easing::{frame_progress, Ease};

/// Parametric card choreography used during the shuffle section
///
/// `offset` must be a pure function of its arguments: the same time and
/// card index always give the same displacement.
pub trait ShuffleMotion: Send + Sync {
    /// Returns the unique id of this motion family
    fn id(&self) -> &str;

    /// Returns a human-readable name shown in logs and metadata
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Displacement in pixels of card `index` from the frame center at
    /// `t` seconds into the shuffle
    fn offset(&self, t: f64, index: usize) -> (f64, f64);
}

/// Motion family chosen for one video, with its nominal duration and easing
#[derive(Clone)]
pub struct ShuffleStyle {
    pub id: String,
    pub name: String,
    /// Nominal length of the motion; the timing plan decides the section length
    pub duration: f64,
    pub ease: Ease,
    motion: Arc<dyn ShuffleMotion>,
}

impl fmt::Debug for ShuffleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShuffleStyle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .finish()
    }
}

impl ShuffleStyle {
    pub fn new(motion: Box<dyn ShuffleMotion>, duration: f64, ease: Ease) -> Self {
        Self {
            id: motion.id().to_string(),
            name: motion.name().to_string(),
            duration,
            ease,
            motion: Arc::from(motion),
        }
    }

    pub fn motion(&self) -> &dyn ShuffleMotion {
        self.motion.as_ref()
    }

    /// Animation time of `frame` in a section of `frames` frames.
    ///
    /// Linear easing gives `frame / fps`; other curves remap the section's
    /// progress over the same span.
    pub fn time_at(&self, frame: usize, frames: usize, fps: u32) -> f64 {
        let span = frames.saturating_sub(1) as f64 / fps.max(1) as f64;
        self.ease.apply(frame_progress(frame, frames)) * span
    }

    /// Top-left corner of card `index`, kept inside the frame
    pub fn card_position(&self, t: f64, index: usize, frame: (u32, u32), card: (u32, u32)) -> (u32, u32) {
        shuffle_position(self.motion(), t, index, frame, card)
    }
}

/// Card centered on the frame, displaced by the motion, clamped to the frame
pub fn shuffle_position(
    motion: &dyn ShuffleMotion,
    t: f64,
    index: usize,
    (width, height): (u32, u32),
    (card_w, card_h): (u32, u32),
) -> (u32, u32) {
    let (dx, dy) = motion.offset(t, index);
    let base_x = (width / 2) as i64 - (card_w / 2) as i64;
    let base_y = (height / 2) as i64 - (card_h / 2) as i64;

    let max_x = width.saturating_sub(card_w) as i64;
    let max_y = height.saturating_sub(card_h) as i64;

    let x = (base_x + dx.trunc() as i64).clamp(0, max_x);
    let y = (base_y + dy.trunc() as i64).clamp(0, max_y);
    (x as u32, y as u32)
}
