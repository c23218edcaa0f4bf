//! Per-frame measurements for one render loop run.
//!
//! The collector keeps the draw duration and kind of every drawn frame and
//! only counts idle iterations, then summarises them into a serialisable [`FrameReport`] with a
//! percentile histogram. The report is what `--report` writes.
//!
//! # Usage
//!
//! ```
//! use sortviz_render::stats::{FrameKind, FrameRecord, FrameStats};
//! use web_time::Duration;
//!
//! let mut stats = FrameStats::new("bubble", 3);
//! stats.record(FrameRecord { kind: FrameKind::Initial, draw_time: Duration::from_micros(80) });
//! stats.record(FrameRecord { kind: FrameKind::Exchange, draw_time: Duration::from_micros(120) });
//! stats.record(FrameRecord { kind: FrameKind::Idle, draw_time: Duration::ZERO });
//!
//! let report = stats.report(Duration::from_millis(40));
//! assert_eq!(report.frames_drawn, 2);
//! assert_eq!(report.events_consumed, 1);
//! assert_eq!(report.idle_frames, 1);
//! ```

use std::io::Write;

use serde::Serialize;
use web_time::Duration;

/// What licensed a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    /// The shuffled input, before any event.
    Initial,
    /// One consumed exchange event.
    Exchange,
    /// The sorted state drawn once the handoff closed.
    Final,
    /// The surface asked for the current state again.
    Redraw,
    /// Nothing was ready; nothing was drawn.
    Idle,
}

impl FrameKind {
    #[must_use]
    pub fn is_drawn(self) -> bool {
        self != Self::Idle
    }
}

/// A single frame's measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRecord {
    pub kind: FrameKind,
    /// Time spent in `draw_frame` + `present`.
    pub draw_time: Duration,
}

/// Collects per-frame records for one run.
#[derive(Debug, Clone)]
pub struct FrameStats {
    algorithm: String,
    items: usize,
    /// Drawn frames only.
    records: Vec<FrameRecord>,
    idle: u64,
}

impl FrameStats {
    #[must_use]
    pub fn new(algorithm: &str, items: usize) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            items,
            records: Vec::with_capacity(1024),
            idle: 0,
        }
    }

    /// Keep a drawn frame; an idle iteration only bumps a counter.
    pub fn record(&mut self, record: FrameRecord) {
        if record.kind.is_drawn() {
            self.records.push(record);
        } else {
            self.idle += 1;
        }
    }

    /// Frames actually drawn (everything but idle iterations).
    #[must_use]
    pub fn frames_drawn(&self) -> usize {
        self.records.len()
    }

    /// Summarise the drawn frames. `elapsed` is the run time shown on screen.
    #[must_use]
    pub fn report(&self, elapsed: Duration) -> FrameReport {
        let mut times_us: Vec<u64> = self
            .records
            .iter()
            .map(|r| r.draw_time.as_micros() as u64)
            .collect();
        times_us.sort_unstable();

        let count = |kind: FrameKind| self.records.iter().filter(|r| r.kind == kind).count() as u64;

        let n = times_us.len();
        let draw_time = if n == 0 {
            FrameTimeHistogram::default()
        } else {
            FrameTimeHistogram {
                count: n as u64,
                min_us: times_us[0],
                max_us: times_us[n - 1],
                p50_us: percentile(&times_us, 0.50),
                p95_us: percentile(&times_us, 0.95),
                p99_us: percentile(&times_us, 0.99),
                mean_us: times_us.iter().sum::<u64>() / n as u64,
            }
        };

        FrameReport {
            algorithm: self.algorithm.clone(),
            items: self.items,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            iterations: n as u64 + self.idle,
            frames_drawn: n as u64,
            events_consumed: count(FrameKind::Exchange),
            idle_frames: self.idle,
            redraws: count(FrameKind::Redraw),
            draw_time,
        }
    }
}

/// Percentile histogram of frame draw times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameTimeHistogram {
    pub count: u64,
    pub min_us: u64,
    pub max_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub mean_us: u64,
}

/// Summary of one render loop run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub algorithm: String,
    pub items: usize,
    pub elapsed_ms: f64,
    pub iterations: u64,
    pub frames_drawn: u64,
    pub events_consumed: u64,
    pub idle_frames: u64,
    pub redraws: u64,
    pub draw_time: FrameTimeHistogram,
}

impl FrameReport {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the pretty JSON form followed by a newline.
    pub fn write_json<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}
