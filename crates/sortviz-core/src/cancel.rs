//! Cooperative cancellation for sort producers.
//!
//! A [`CancelToken`] is handed to the producer side of a run and checked at
//! every exchange. The consumer keeps the companion [`CancelHandle`] and flips
//! it when the host goes away (window closed, `q` pressed, session dropped).
//!
//! Cancellation is sticky and idempotent: once cancelled, a token never
//! becomes live again, and cancelling twice is a no-op.
//!
//! ```
//! use sortviz_core::cancel::CancelToken;
//!
//! let (token, handle) = CancelToken::new();
//! assert!(token.check().is_ok());
//! handle.cancel();
//! assert!(token.is_cancelled());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Producer-side view of a run's cancellation state.
///
/// Cheaply cloneable. Check it between units of work.
#[derive(Clone, Debug)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a live token and the handle that cancels it.
    #[must_use]
    pub fn new() -> (Self, CancelHandle) {
        let cancelled = Arc::new(AtomicBool::new(false));
        (
            Self {
                cancelled: cancelled.clone(),
            },
            CancelHandle { cancelled },
        )
    }

    /// A token nobody can cancel. Used for offline runs and tests.
    #[must_use]
    pub fn never() -> Self {
        Self::new().0
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Return `Err(Cancelled)` once the run has been cancelled.
    #[inline]
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Consumer-side control for a [`CancelToken`].
///
/// Dropping the handle does **not** cancel the token.
#[derive(Debug)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the run. All clones of the token observe it.
    ///
    /// Returns `true` if this call did the cancelling.
    pub fn cancel(&self) -> bool {
        let was_cancelled = self.cancelled.swap(true, Ordering::AcqRel);
        if !was_cancelled {
            tracing::debug!("sort run cancelled");
        }
        !was_cancelled
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// The run was cancelled or its consumer detached before the sort finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sort run cancelled")]
pub struct Cancelled;
