#![forbid(unsafe_code)]

//! Core: exchange-observable sequences, sorting algorithms, and the
//! lockstep handoff between a sorting producer and a rendering consumer.
//!
//! Every algorithm in [`algorithms`] mutates an [`ObservableSequence`] only
//! through [`ObservableSequence::exchange`]. Each exchange is reported to an
//! [`ExchangeSink`]; when the sink is a [`handoff::HandoffSender`], the
//! producer blocks until the consumer has taken the event, so the consumer
//! dictates the pace of the sort.

pub mod algorithms;
pub mod cancel;
pub mod config;
pub mod error;
pub mod event;
pub mod handoff;
pub mod replay;
pub mod sequence;
pub mod session;
pub mod shuffle;
pub mod timer;

pub use algorithms::Algorithm;
pub use cancel::{CancelHandle, CancelToken, Cancelled};
pub use config::RunConfig;
pub use error::{ConfigError, CoreError, UnknownAlgorithm};
pub use event::{Exchange, Frame};
pub use handoff::{HandoffReceiver, HandoffSender, Recv};
pub use replay::ExchangeLog;
pub use sequence::{Discard, ExchangeSink, ObservableSequence, SequenceStats};
pub use session::{RunOutcome, RunStatus, SortSession};
pub use timer::RunTimer;
