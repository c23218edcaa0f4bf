//! Rendezvous handoff between the sorting producer and the render consumer.
//!
//! The channel has zero capacity: [`HandoffSender::deliver`] returns only
//! once the consumer has received the frame. That gives strict lockstep.
//! The producer computes one exchange, publishes it, and cannot start on the
//! next comparison until the consumer has accepted the previous one.
//!
//! # Closing
//!
//! The producer closes the handoff by dropping its sender after the last
//! send. Closing is not an event; the consumer sees it as [`Recv::Closed`]
//! on this and every later receive.
//!
//! # Detaching
//!
//! If the consumer drops its [`HandoffReceiver`] while the producer is
//! blocked in a send, the send fails and the producer observes
//! [`Cancelled`]. A consumer that goes away can therefore never strand the
//! producer.

use std::sync::mpsc;

use web_time::Duration;

use crate::cancel::Cancelled;
use crate::event::{Exchange, Frame};
use crate::sequence::ExchangeSink;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn handoff<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = mpsc::sync_channel::<Frame<T>>(0);
    (HandoffSender { tx }, HandoffReceiver { rx, closed: false })
}

/// Producer half. Implements [`ExchangeSink`] so it can be attached
/// directly to an [`ObservableSequence`](crate::ObservableSequence).
#[derive(Debug)]
pub struct HandoffSender<T> {
    tx: mpsc::SyncSender<Frame<T>>,
}

impl<T> HandoffSender<T> {
    /// Block until the consumer takes `frame`.
    pub fn send(&self, frame: Frame<T>) -> Result<(), Cancelled> {
        self.tx.send(frame).map_err(|_| {
            tracing::debug!("handoff consumer detached; abandoning send");
            Cancelled
        })
    }
}

impl<T: Copy> ExchangeSink<T> for HandoffSender<T> {
    fn deliver(&mut self, exchange: Exchange<T>, snapshot: &[T]) -> Result<(), Cancelled> {
        self.send(Frame {
            exchange,
            snapshot: snapshot.to_vec(),
        })
    }
}

/// Result of a receive on the consumer side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recv<T> {
    /// A real exchange, with the sequence as it stood right after it.
    Frame(Frame<T>),
    /// The producer finished (or went away). No more frames will arrive.
    Closed,
    /// Nothing arrived within the timeout. The handoff is still open.
    Pending,
}

impl<T> Recv<T> {
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Consumer half.
#[derive(Debug)]
pub struct HandoffReceiver<T> {
    rx: mpsc::Receiver<Frame<T>>,
    closed: bool,
}

impl<T> HandoffReceiver<T> {
    /// Block until the next frame or the close.
    pub fn recv(&mut self) -> Recv<T> {
        if self.closed {
            return Recv::Closed;
        }
        match self.rx.recv() {
            Ok(frame) => Recv::Frame(frame),
            Err(mpsc::RecvError) => self.mark_closed(),
        }
    }

    /// Wait at most `timeout` for the next frame.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Recv<T> {
        if self.closed {
            return Recv::Closed;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(frame) => Recv::Frame(frame),
            Err(mpsc::RecvTimeoutError::Timeout) => Recv::Pending,
            Err(mpsc::RecvTimeoutError::Disconnected) => self.mark_closed(),
        }
    }

    /// Whether the close has been observed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Receive every remaining frame until the close. Used when the consumer
    /// wants to let the producer finish instead of cancelling it.
    pub fn drain(&mut self) -> Vec<Frame<T>> {
        let mut frames = Vec::new();
        while let Recv::Frame(frame) = self.recv() {
            frames.push(frame);
        }
        frames
    }

    fn mark_closed(&mut self) -> Recv<T> {
        if !self.closed {
            tracing::debug!("handoff closed by producer");
        }
        self.closed = true;
        Recv::Closed
    }
}
