//! Sorting algorithms expressed purely through `less` and `exchange`.
//!
//! Each algorithm is a free function over an [`ObservableSequence`]. They are
//! interchangeable at the call site through [`Algorithm::run`]. The six
//! hand-written strategies reproduce a fixed exchange order, so a given input
//! always yields the same event stream. [`Algorithm::Default`] delegates the
//! ordering decision to the standard library and only guarantees a sorted
//! result.
//!
//! Every function returns `Err(Cancelled)` as soon as an exchange is refused,
//! leaving the sequence a valid permutation of its input.

mod heap;
mod library;
mod quick;
mod simple;

use std::fmt;
use std::str::FromStr;

use crate::cancel::Cancelled;
use crate::error::UnknownAlgorithm;
use crate::sequence::{ExchangeSink, ObservableSequence};

pub use heap::heap_sort;
pub use library::library_sort;
pub use quick::quick_sort;
pub use simple::{bubble_sort, insertion_sort, selection_sort, shell_sort};

#[doc(hidden)]
pub use heap::heapify;
#[doc(hidden)]
pub use quick::partition;

/// A selectable sorting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    Quick,
    Bubble,
    Selection,
    Insertion,
    Heap,
    Shell,
    /// The standard library's comparison sort.
    #[default]
    Default,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Self::Quick,
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Heap,
        Self::Shell,
        Self::Default,
    ];

    /// Name accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Heap => "heap",
            Self::Shell => "shell",
            Self::Default => "default",
        }
    }

    /// Human-readable label shown above the bars.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quick => "Quick sort",
            Self::Bubble => "Bubble sort",
            Self::Selection => "Selection sort",
            Self::Insertion => "Insertion sort",
            Self::Heap => "Heap sort",
            Self::Shell => "Shell sort",
            Self::Default => "Default sort",
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.name()).collect()
    }

    /// Whether the exchange order is fixed for a given input.
    #[must_use]
    pub const fn is_deterministic_trace(self) -> bool {
        !matches!(self, Self::Default)
    }

    /// Sort `seq` in place, reporting every exchange to its sink.
    pub fn run<T, S>(self, seq: &mut ObservableSequence<T, S>) -> Result<(), Cancelled>
    where
        T: Ord + Copy,
        S: ExchangeSink<T>,
    {
        match self {
            Self::Quick => quick_sort(seq),
            Self::Bubble => bubble_sort(seq),
            Self::Selection => selection_sort(seq),
            Self::Insertion => insertion_sort(seq),
            Self::Heap => heap_sort(seq),
            Self::Shell => shell_sort(seq),
            Self::Default => library_sort(seq),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAlgorithm {
                name: s.to_string(),
            })
    }
}
