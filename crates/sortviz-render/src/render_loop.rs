//! The consumer half of a sort run.
//!
//! Each iteration polls the renderer for a quit request, waits at most the
//! rest of the frame for one event, draws if that frame is licensed, and
//! sleeps out the interval:
//!
//! | received      | drawn                                           |
//! |---------------|-------------------------------------------------|
//! | (first frame) | the shuffled input, nothing highlighted         |
//! | `Frame`       | the snapshot, both exchanged positions lit      |
//! | `Closed`      | the sorted state once, with the timer frozen    |
//! | `Pending`     | nothing, unless the surface needs a redraw      |
//!
//! On `Closed` the producer is joined before the final frame, so a producer
//! that panicked ends the loop with an error instead of a `[done]` screen.
//!
//! Quitting, finishing with `exit_on_finish`, or any render error ends the
//! loop. The session is shut down on every path, so the producer thread is
//! always joined.

use sortviz_core::{ExchangeLog, Recv, RunConfig, RunOutcome, SortSession};
use web_time::{Duration, Instant};

use crate::error::Result;
use crate::pacer::FramePacer;
use crate::renderer::{FrameView, Renderer};
use crate::stats::{FrameKind, FrameRecord, FrameReport, FrameStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    pub frame_interval: Duration,
    /// Leave the loop after the final frame instead of waiting for a quit.
    pub exit_on_finish: bool,
}

impl LoopOptions {
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            exit_on_finish: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.frame_interval())
    }

    #[must_use]
    pub fn exit_on_finish(mut self, exit: bool) -> Self {
        self.exit_on_finish = exit;
        self
    }
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Finished,
    Quit,
}

#[derive(Debug)]
pub struct LoopSummary {
    pub outcome: RunOutcome<u32>,
    /// Every event the loop consumed, in order.
    pub log: ExchangeLog<u32>,
    pub report: FrameReport,
    /// Run time as last shown.
    pub elapsed: Duration,
    pub stop: StopReason,
}

/// What is currently on screen.
struct Shown {
    values: Vec<u32>,
    highlight: Option<(usize, usize)>,
    exchanges: u64,
    finished: bool,
}

/// Drive `session` to completion (or a quit) through `renderer`.
pub fn run<R: Renderer>(
    mut session: SortSession<u32>,
    mut renderer: R,
    options: LoopOptions,
) -> Result<LoopSummary> {
    let algorithm = session.algorithm();
    let label = algorithm.label();
    let span = tracing::info_span!("render_loop", %algorithm);
    let _guard = span.enter();

    let mut shown = Shown {
        values: session.initial().to_vec(),
        highlight: None,
        exchanges: 0,
        finished: false,
    };
    let mut log = ExchangeLog::new();
    let mut stats = FrameStats::new(algorithm.name(), shown.values.len());
    let mut pacer = FramePacer::new(options.frame_interval);

    let stop = loop {
        let frame_index = pacer.begin();
        if renderer.close_requested()? {
            break StopReason::Quit;
        }

        let kind = if frame_index == 0 {
            FrameKind::Initial
        } else if shown.finished {
            redraw_or_idle(&mut renderer)
        } else {
            match session.recv_timeout(pacer.remaining()) {
                Recv::Frame(frame) => {
                    let exchange = frame.exchange;
                    shown.values = frame.snapshot;
                    shown.highlight = Some((exchange.i, exchange.j));
                    shown.exchanges = exchange.seq;
                    log.push(exchange);
                    FrameKind::Exchange
                }
                Recv::Closed => {
                    session.collect_outcome()?;
                    let elapsed = session.freeze_timer();
                    shown.highlight = None;
                    shown.finished = true;
                    tracing::info!(
                        exchanges = shown.exchanges,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "sort finished"
                    );
                    FrameKind::Final
                }
                Recv::Pending => redraw_or_idle(&mut renderer),
            }
        };

        let draw_time = if kind.is_drawn() {
            let started = Instant::now();
            let view = FrameView {
                values: &shown.values,
                highlight: shown.highlight,
                elapsed: session.timer().elapsed(),
                label,
                exchanges: shown.exchanges,
                finished: shown.finished,
            };
            renderer.draw_frame(&view)?;
            renderer.present()?;
            started.elapsed()
        } else {
            Duration::ZERO
        };
        stats.record(FrameRecord { kind, draw_time });

        if shown.finished && options.exit_on_finish {
            break StopReason::Finished;
        }
        renderer.frame_wait(pacer.remaining());
    };

    let elapsed = session.freeze_timer();
    let outcome = session.shutdown()?;
    tracing::info!(
        ?stop,
        status = ?outcome.status,
        frames = stats.frames_drawn(),
        overruns = pacer.overruns(),
        "render loop finished"
    );

    Ok(LoopSummary {
        outcome,
        log,
        report: stats.report(elapsed),
        elapsed,
        stop,
    })
}

fn redraw_or_idle<R: Renderer>(renderer: &mut R) -> FrameKind {
    if renderer.needs_redraw() {
        FrameKind::Redraw
    } else {
        FrameKind::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessRenderer;
    use sortviz_core::{Algorithm, RunStatus};

    fn options() -> LoopOptions {
        LoopOptions::new(Duration::from_millis(20)).exit_on_finish(true)
    }

    #[test]
    fn first_frame_is_initial_state() {
        let session = SortSession::spawn(Algorithm::Bubble, vec![3, 1, 2]).unwrap();
        let mut renderer = HeadlessRenderer::recording();
        let summary = run(session, &mut renderer, options()).unwrap();

        let first = &renderer.frames()[0];
        assert_eq!(first.values, vec![3, 1, 2]);
        assert_eq!(first.highlight, None);
        assert_eq!(first.exchanges, 0);
        assert_eq!(summary.stop, StopReason::Finished);
    }

    #[test]
    fn one_frame_per_exchange_then_final() {
        let session = SortSession::spawn(Algorithm::Bubble, vec![3, 1, 2]).unwrap();
        let mut renderer = HeadlessRenderer::recording();
        let summary = run(session, &mut renderer, options()).unwrap();

        let frames = renderer.frames();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1].values, vec![1, 3, 2]);
        assert_eq!(frames[1].highlight, Some((0, 1)));
        assert_eq!(frames[2].values, vec![1, 2, 3]);
        assert_eq!(frames[2].highlight, Some((1, 2)));
        assert!(frames[3].finished);
        assert_eq!(frames[3].highlight, None);
        assert_eq!(frames[3].exchanges, 2);

        assert!(summary.outcome.is_completed());
        assert_eq!(summary.log.len(), 2);
        assert_eq!(summary.report.events_consumed, 2);
    }

    #[test]
    fn timer_is_frozen_on_final_frame() {
        let session = SortSession::spawn(Algorithm::Insertion, vec![2, 1]).unwrap();
        let mut renderer = HeadlessRenderer::recording();
        let summary = run(session, &mut renderer, options()).unwrap();
        let last = renderer.frames().last().unwrap();
        assert!(last.finished);
        assert_eq!(last.elapsed, summary.elapsed);
    }

    #[test]
    fn quit_mid_run_cancels_producer() {
        let values: Vec<u32> = (1..=300).rev().collect();
        let session = SortSession::spawn(Algorithm::Bubble, values).unwrap();
        let renderer = HeadlessRenderer::new().close_after(5);
        let summary = run(session, renderer, options()).unwrap();

        assert_eq!(summary.stop, StopReason::Quit);
        assert_eq!(summary.outcome.status, RunStatus::Cancelled);
        assert_eq!(summary.log.len(), 4);
    }

    #[test]
    fn without_exit_on_finish_waits_for_quit() {
        let session = SortSession::spawn(Algorithm::Selection, vec![2, 1]).unwrap();
        let renderer = HeadlessRenderer::new().close_after(3);
        let summary = run(session, renderer, LoopOptions::new(Duration::from_millis(1))).unwrap();
        assert_eq!(summary.stop, StopReason::Quit);
        assert!(summary.outcome.is_completed());
        // initial + one exchange + final; idle iterations after that
        assert_eq!(summary.report.frames_drawn, 3);
    }
}
