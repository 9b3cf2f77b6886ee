use crate::error::Result;
use crate::video::types::Frame;

/// Destination of rendered frames, in presentation order
pub trait FrameSink {
    fn push(&mut self, frame: &Frame) -> Result<()>;

    /// Push the same frame `count` times; static sections use this
    fn push_repeated(&mut self, frame: &Frame, count: usize) -> Result<()> {
        for _ in 0..count {
            self.push(frame)?;
        }
        Ok(())
    }

    /// Frames accepted so far
    fn frames_written(&self) -> usize;
}

/// Keeps every frame in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    frames: Vec<Frame>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl FrameSink for CollectingSink {
    fn push(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn frames_written(&self) -> usize {
        self.frames.len()
    }
}

/// Counts frames without keeping them
#[derive(Debug, Default)]
pub struct CountingSink {
    count: usize,
}

impl FrameSink for CountingSink {
    fn push(&mut self, _frame: &Frame) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn push_repeated(&mut self, _frame: &Frame, count: usize) -> Result<()> {
        self.count += count;
        Ok(())
    }

    fn frames_written(&self) -> usize {
        self.count
    }
}
