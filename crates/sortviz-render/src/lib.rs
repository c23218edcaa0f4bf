#![forbid(unsafe_code)]

//! Rendering side of sortviz.
//!
//! The [`Renderer`] trait is the host capability the render loop draws
//! through. Two implementations ship here: [`TerminalRenderer`] draws a bar
//! chart with crossterm, and [`HeadlessRenderer`] draws nothing and never
//! waits. [`render_loop::run`] is the consumer half of a
//! [`SortSession`](sortviz_core::SortSession): one frame per exchange, paced
//! to the configured cadence.

pub mod error;
pub mod headless;
pub mod layout;
pub mod pacer;
pub mod render_loop;
pub mod renderer;
pub mod stats;
pub mod terminal;

pub use error::RenderError;
pub use headless::{HeadlessRenderer, RecordedFrame};
pub use pacer::FramePacer;
pub use render_loop::{LoopOptions, LoopSummary, StopReason};
pub use renderer::{FrameView, Renderer};
pub use stats::{FrameKind, FrameRecord, FrameReport, FrameStats, FrameTimeHistogram};
pub use terminal::{TerminalRenderer, TerminalSession};
