//! Run configuration, built once at startup and passed by value.

use web_time::Duration;

use crate::algorithms::Algorithm;
use crate::error::ConfigError;
use crate::shuffle;

pub const DEFAULT_ITEMS: u32 = 100;
pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 1000;

/// Everything needed to start one sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub algorithm: Algorithm,
    /// Number of values; the input is a shuffled `1..=items`.
    pub items: u32,
    /// Render cadence in frames per second.
    pub fps: u32,
    /// Shuffle seed. `None` picks a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Default,
            items: DEFAULT_ITEMS,
            fps: DEFAULT_FPS,
            seed: None,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: u32) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations that cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items == 0 {
            return Err(ConfigError::ZeroItems);
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::FpsOutOfRange {
                fps: self.fps,
                max: MAX_FPS,
            });
        }
        Ok(())
    }

    /// Time budget of one frame.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Pin the seed so the run can be reproduced, and return it.
    pub fn resolve_seed(&mut self) -> u64 {
        *self.seed.get_or_insert_with(shuffle::random_seed)
    }

    /// The input sequence for this run. Resolves the seed first.
    pub fn input(&mut self) -> Vec<u32> {
        let seed = self.resolve_seed();
        shuffle::shuffled_permutation(self.items, seed)
    }
}
