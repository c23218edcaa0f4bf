//! Recording and replaying exchange logs.
//!
//! An [`ExchangeLog`] is an [`ExchangeSink`] that keeps every event in
//! memory. Applying the recorded exchanges, in order, to a copy of the
//! initial sequence reproduces the final sequence exactly; [`replay`] does
//! that and [`ExchangeLog::write_jsonl`] exports the log one JSON object per
//! line for offline inspection.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cancel::Cancelled;
use crate::error::Result;
use crate::event::Exchange;
use crate::sequence::ExchangeSink;

/// In-memory exchange recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeLog<T> {
    events: Vec<Exchange<T>>,
}

impl<T> ExchangeLog<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    #[must_use]
    pub fn events(&self) -> &[Exchange<T>] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Record an event that arrived some other way (e.g. through a handoff).
    pub fn push(&mut self, exchange: Exchange<T>) {
        self.events.push(exchange);
    }
}

impl<T> Default for ExchangeLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> ExchangeSink<T> for ExchangeLog<T> {
    fn deliver(
        &mut self,
        exchange: Exchange<T>,
        _snapshot: &[T],
    ) -> std::result::Result<(), Cancelled> {
        self.events.push(exchange);
        Ok(())
    }
}

impl<T: Serialize> ExchangeLog<T> {
    /// Write the log as JSON lines.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> Result<()> {
        for event in &self.events {
            serde_json::to_writer(&mut out, event)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl<T: DeserializeOwned> ExchangeLog<T> {
    /// Read a log written by [`write_jsonl`](Self::write_jsonl). Blank lines
    /// are skipped.
    pub fn read_jsonl<R: BufRead>(input: R) -> Result<Self> {
        let mut events = Vec::new();
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(serde_json::from_str(&line)?);
        }
        Ok(Self { events })
    }
}

/// Apply `events` in order to a copy of `initial` and return the result.
///
/// # Panics
///
/// Panics if an event names a position outside `initial`.
#[must_use]
pub fn replay<T: Copy>(initial: &[T], events: &[Exchange<T>]) -> Vec<T> {
    let mut values = initial.to_vec();
    for event in events {
        values.swap(event.i, event.j);
    }
    values
}

/// Check that each event's reported values match the replayed state right
/// after that event. Returns the `seq` of the first mismatching event.
#[must_use]
pub fn first_divergence<T: Copy + PartialEq>(initial: &[T], events: &[Exchange<T>]) -> Option<u64> {
    let mut values = initial.to_vec();
    for event in events {
        values.swap(event.i, event.j);
        if (values[event.i], values[event.j]) != event.values {
            return Some(event.seq);
        }
    }
    None
}
