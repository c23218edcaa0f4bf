use web_time::{Duration, Instant};

/// Wall-clock timer for one run.
///
/// Starts when the producer is started and freezes the first time
/// [`freeze`](Self::freeze) is called (when the consumer observes the close).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimer {
    started_at: Instant,
    frozen: Option<Duration>,
}

impl RunTimer {
    #[must_use]
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    #[must_use]
    pub fn started_at(started_at: Instant) -> Self {
        Self {
            started_at,
            frozen: None,
        }
    }

    /// Elapsed time, or the frozen value once frozen.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.frozen.unwrap_or_else(|| self.started_at.elapsed())
    }

    /// Stop the clock. Later calls keep the first frozen value.
    pub fn freeze(&mut self) -> Duration {
        let started_at = self.started_at;
        *self.frozen.get_or_insert_with(|| started_at.elapsed())
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }
}
