//! One sort run: a producer thread driving an algorithm, paired with the
//! consumer half of the handoff.
//!
//! [`SortSession::spawn`] moves the input onto a dedicated producer thread
//! (`sortviz-producer`) which runs the algorithm against an
//! [`ObservableSequence`] whose sink is the rendezvous sender. The caller
//! keeps the session and pulls frames from it at its own pace.
//!
//! # Shutdown
//!
//! - [`drain_and_join`](SortSession::drain_and_join) lets the producer finish
//!   by consuming every remaining frame.
//! - [`shutdown`](SortSession::shutdown) cancels the run, detaches the
//!   consumer (which fails any blocked send), and joins the producer.
//! - Dropping the session does the same as `shutdown`, best effort.
//!
//! Either way the producer thread is joined exactly once and never leaks.
//! A consumer that sees the close early can call
//! [`collect_outcome`](SortSession::collect_outcome) to join right away, so a
//! producer that panicked is reported before anything claims the run is done.
//!
//! # Example
//!
//! ```
//! use sortviz_core::{Algorithm, Recv, SortSession};
//!
//! let mut session = SortSession::spawn(Algorithm::Bubble, vec![3u32, 1, 2]).unwrap();
//! let mut frames = 0;
//! while let Recv::Frame(_) = session.recv() {
//!     frames += 1;
//! }
//! assert_eq!(frames, 2);
//! let outcome = session.shutdown().unwrap();
//! assert!(outcome.is_completed());
//! assert_eq!(outcome.final_values, vec![1, 2, 3]);
//! ```

use std::thread::{self, JoinHandle};

use web_time::Duration;

use crate::algorithms::Algorithm;
use crate::cancel::{CancelHandle, CancelToken};
use crate::error::{CoreError, Result};
use crate::event::Frame;
use crate::handoff::{HandoffReceiver, Recv, handoff};
use crate::sequence::{ObservableSequence, SequenceStats};
use crate::timer::RunTimer;

/// How the producer left the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

/// What the producer thread reports when joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome<T> {
    pub algorithm: Algorithm,
    pub status: RunStatus,
    pub stats: SequenceStats,
    /// The sequence as the producer left it. Sorted when `Completed`.
    pub final_values: Vec<T>,
}

impl<T> RunOutcome<T> {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Handle to a running sort.
#[derive(Debug)]
pub struct SortSession<T> {
    algorithm: Algorithm,
    initial: Vec<T>,
    receiver: Option<HandoffReceiver<T>>,
    cancel: CancelHandle,
    handle: Option<JoinHandle<RunOutcome<T>>>,
    outcome: Option<RunOutcome<T>>,
    timer: RunTimer,
}

impl<T> SortSession<T>
where
    T: Ord + Copy + Send + 'static,
{
    /// Start sorting `values` with `algorithm` on a new producer thread.
    ///
    /// The producer blocks on its first exchange until the caller receives.
    pub fn spawn(algorithm: Algorithm, values: Vec<T>) -> Result<Self> {
        let (sender, receiver) = handoff::<T>();
        let (token, cancel) = CancelToken::new();
        let initial = values.clone();
        let items = values.len();

        let timer = RunTimer::start();
        let handle = thread::Builder::new()
            .name("sortviz-producer".into())
            .spawn(move || {
                let span = tracing::info_span!("producer", %algorithm, items);
                let _guard = span.enter();

                let mut seq = ObservableSequence::with_token(values, sender, token);
                let status = match algorithm.run(&mut seq) {
                    Ok(()) => RunStatus::Completed,
                    Err(_) => RunStatus::Cancelled,
                };
                let stats = seq.stats();
                let (final_values, sender) = seq.into_parts();
                // closes the handoff
                drop(sender);
                tracing::info!(
                    ?status,
                    comparisons = stats.comparisons,
                    exchanges = stats.exchanges,
                    "producer finished"
                );
                RunOutcome {
                    algorithm,
                    status,
                    stats,
                    final_values,
                }
            })
            .map_err(CoreError::Spawn)?;

        tracing::info!(%algorithm, items, "sort session started");
        Ok(Self {
            algorithm,
            initial,
            receiver: Some(receiver),
            cancel,
            handle: Some(handle),
            outcome: None,
            timer,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The input as it was before the first exchange.
    #[must_use]
    pub fn initial(&self) -> &[T] {
        &self.initial
    }

    #[must_use]
    pub fn timer(&self) -> &RunTimer {
        &self.timer
    }

    /// Stop the run clock. Called by the consumer once it sees the close.
    pub fn freeze_timer(&mut self) -> Duration {
        self.timer.freeze()
    }

    /// Block until the next frame or the close.
    pub fn recv(&mut self) -> Recv<T> {
        match self.receiver.as_mut() {
            Some(rx) => rx.recv(),
            None => Recv::Closed,
        }
    }

    /// Wait at most `timeout` for the next frame.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Recv<T> {
        match self.receiver.as_mut() {
            Some(rx) => rx.recv_timeout(timeout),
            None => Recv::Closed,
        }
    }

    /// Whether the consumer has observed the close.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.receiver.as_ref().is_none_or(HandoffReceiver::is_closed)
    }

    /// Ask the producer to stop at its next exchange.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Join a producer whose close has been observed.
    ///
    /// A panic on the producer thread drops the sender while unwinding, which
    /// looks like a normal close from this side. Joining here surfaces it as
    /// [`CoreError::ProducerPanicked`]. The outcome is kept for `shutdown`.
    pub fn collect_outcome(&mut self) -> Result<()> {
        if self.outcome.is_none() {
            let outcome = self.join_producer()?;
            self.outcome = Some(outcome);
        }
        Ok(())
    }

    /// Consume every remaining frame, then join the producer.
    pub fn drain_and_join(mut self) -> Result<(RunOutcome<T>, Vec<Frame<T>>)> {
        let frames = match self.receiver.as_mut() {
            Some(rx) => rx.drain(),
            None => Vec::new(),
        };
        let outcome = self.finish()?;
        Ok((outcome, frames))
    }

    /// Cancel, detach the consumer, and join the producer.
    ///
    /// A run whose close was already observed is joined without cancelling.
    pub fn shutdown(mut self) -> Result<RunOutcome<T>> {
        if !self.is_closed() {
            self.cancel.cancel();
        }
        self.receiver.take();
        self.finish()
    }

    fn finish(&mut self) -> Result<RunOutcome<T>> {
        match self.outcome.take() {
            Some(outcome) => Ok(outcome),
            None => self.join_producer(),
        }
    }

    fn join_producer(&mut self) -> Result<RunOutcome<T>> {
        // the receiver must be closed or gone, or join could wait on a send
        if !self.is_closed() {
            self.receiver.take();
        }
        let handle = self.handle.take().ok_or(CoreError::AlreadyJoined)?;
        handle.join().map_err(|_| CoreError::ProducerPanicked)
    }
}

impl<T> Drop for SortSession<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            self.receiver.take();
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    /// Comparing against zero panics, to stand in for a faulty `Ord`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Fragile(u32);

    impl Ord for Fragile {
        fn cmp(&self, other: &Self) -> Ordering {
            assert!(self.0 != 0 && other.0 != 0, "cannot compare zero");
            self.0.cmp(&other.0)
        }
    }

    impl PartialOrd for Fragile {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    #[test]
    fn frames_match_exchange_count() {
        let mut session = SortSession::spawn(Algorithm::Selection, vec![4u32, 3, 2, 1]).unwrap();
        let mut seqs = Vec::new();
        while let Recv::Frame(frame) = session.recv() {
            seqs.push(frame.exchange.seq);
        }
        assert_eq!(seqs, vec![1, 2, 3]);
        assert!(session.is_closed());
        let outcome = session.shutdown().unwrap();
        assert!(outcome.is_completed());
        assert_eq!(outcome.stats.exchanges, 3);
    }

    #[test]
    fn empty_input_closes_immediately() {
        let mut session = SortSession::spawn(Algorithm::Quick, Vec::<u32>::new()).unwrap();
        assert_eq!(session.recv(), Recv::Closed);
        let outcome = session.shutdown().unwrap();
        assert!(outcome.is_completed());
        assert_eq!(outcome.stats.exchanges, 0);
    }

    #[test]
    fn shutdown_mid_run_cancels() {
        let values: Vec<u32> = (1..=200).rev().collect();
        let mut session = SortSession::spawn(Algorithm::Bubble, values).unwrap();
        assert!(matches!(session.recv(), Recv::Frame(_)));
        let outcome = session.shutdown().unwrap();
        assert_eq!(outcome.status, RunStatus::Cancelled);
        assert!(outcome.stats.exchanges <= 2);
    }

    #[test]
    fn producer_panic_is_reported_at_close() {
        let mut session =
            SortSession::spawn(Algorithm::Insertion, vec![Fragile(0), Fragile(1)]).unwrap();
        assert_eq!(session.recv(), Recv::Closed);
        assert!(matches!(
            session.collect_outcome(),
            Err(CoreError::ProducerPanicked)
        ));
        assert!(matches!(session.shutdown(), Err(CoreError::AlreadyJoined)));
    }

    #[test]
    fn collected_outcome_is_returned_by_shutdown() {
        let mut session = SortSession::spawn(Algorithm::Bubble, vec![2u32, 1]).unwrap();
        assert!(matches!(session.recv(), Recv::Frame(_)));
        assert_eq!(session.recv(), Recv::Closed);
        session.collect_outcome().unwrap();
        session.collect_outcome().unwrap();
        let outcome = session.shutdown().unwrap();
        assert!(outcome.is_completed());
        assert_eq!(outcome.final_values, vec![1, 2]);
    }

    #[test]
    fn drain_and_join_collects_everything() {
        let session = SortSession::spawn(Algorithm::Insertion, vec![3u32, 2, 1]).unwrap();
        let initial = session.initial().to_vec();
        let (outcome, frames) = session.drain_and_join().unwrap();
        assert_eq!(initial, vec![3, 2, 1]);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.last().unwrap().snapshot, vec![1, 2, 3]);
        assert_eq!(outcome.final_values, vec![1, 2, 3]);
    }

    #[test]
    fn drop_without_receiving_does_not_hang() {
        let values: Vec<u32> = (1..=100).rev().collect();
        let session = SortSession::spawn(Algorithm::Heap, values).unwrap();
        drop(session);
    }
}
