#![forbid(unsafe_code)]

//! Command-line front end: parses flags into a [`RunConfig`], sets up
//! logging, and runs one sort through the terminal or headless renderer.
//!
//! [`RunConfig`]: sortviz_core::RunConfig

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;

pub use cli::{Cli, run, run_from_env};
pub use error::{AppError, Result};
