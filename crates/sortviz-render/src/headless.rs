//! A renderer that draws nothing and never waits.
//!
//! Used for `--headless` runs, where the loop should consume every event as
//! fast as the producer delivers them, and by tests, which can record what
//! each frame would have shown and script a quit after N frames.

use std::io;

use web_time::Duration;

use crate::renderer::{FrameView, Renderer};

/// Owned copy of a [`FrameView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub values: Vec<u32>,
    pub highlight: Option<(usize, usize)>,
    pub elapsed: Duration,
    pub exchanges: u64,
    pub finished: bool,
}

impl From<&FrameView<'_>> for RecordedFrame {
    fn from(view: &FrameView<'_>) -> Self {
        Self {
            values: view.values.to_vec(),
            highlight: view.highlight,
            elapsed: view.elapsed,
            exchanges: view.exchanges,
            finished: view.finished,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    drawn: u64,
    presented: u64,
    record: bool,
    frames: Vec<RecordedFrame>,
    close_after: Option<u64>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a copy of every drawn frame.
    #[must_use]
    pub fn recording() -> Self {
        Self {
            record: true,
            ..Self::default()
        }
    }

    /// Request close once `frames` frames have been presented.
    #[must_use]
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.drawn
    }

    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    /// Recorded frames; empty unless created with [`recording`](Self::recording).
    #[must_use]
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn draw_frame(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        self.drawn += 1;
        if self.record {
            self.frames.push(frame.into());
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }

    fn frame_wait(&mut self, _remaining: Duration) {}

    fn close_requested(&mut self) -> io::Result<bool> {
        Ok(self.close_after.is_some_and(|limit| self.presented >= limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(values: &[u32]) -> FrameView<'_> {
        FrameView {
            values,
            highlight: Some((0, 1)),
            elapsed: Duration::from_millis(5),
            label: "Heap sort",
            exchanges: 1,
            finished: false,
        }
    }

    #[test]
    fn counts_without_recording() {
        let mut r = HeadlessRenderer::new();
        r.draw_frame(&view(&[1, 2])).unwrap();
        r.present().unwrap();
        assert_eq!(r.frames_drawn(), 1);
        assert_eq!(r.frames_presented(), 1);
        assert!(r.frames().is_empty());
    }

    #[test]
    fn recording_keeps_owned_copies() {
        let mut r = HeadlessRenderer::recording();
        r.draw_frame(&view(&[2, 1])).unwrap();
        assert_eq!(r.frames()[0].values, vec![2, 1]);
        assert_eq!(r.frames()[0].highlight, Some((0, 1)));
    }

    #[test]
    fn close_after_presents() {
        let mut r = HeadlessRenderer::new().close_after(2);
        assert!(!r.close_requested().unwrap());
        r.present().unwrap();
        assert!(!r.close_requested().unwrap());
        r.present().unwrap();
        assert!(r.close_requested().unwrap());
    }
}
