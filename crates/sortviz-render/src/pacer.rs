use web_time::{Duration, Instant};

/// Fixed-cadence frame clock.
///
/// Call [`begin`](Self::begin) at the top of every frame; whatever the frame
/// did not use of the interval is [`remaining`](Self::remaining).
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    frame_start: Instant,
    frames: u64,
    overruns: u64,
}

impl FramePacer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_start: Instant::now(),
            frames: 0,
            overruns: 0,
        }
    }

    /// Start a new frame and return its zero-based index.
    pub fn begin(&mut self) -> u64 {
        if self.frames > 0 && self.frame_start.elapsed() > self.interval {
            self.overruns += 1;
        }
        self.frame_start = Instant::now();
        self.frames += 1;
        self.frames - 1
    }

    /// Time left in the current frame.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.frame_start.elapsed())
    }

    /// Frames that ran past their interval.
    #[must_use]
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
