//! Global tracing subscriber.
//!
//! Logs go to stderr at `warn` unless `RUST_LOG` says otherwise. With a log
//! file they go there instead, without ANSI colours, at `info` by default.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, Result};

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber. A second call keeps the first subscriber.
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let installed = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::output(path, source))?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(filter("info"));
            tracing_subscriber::registry().with(layer).try_init()
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter("warn"));
            tracing_subscriber::registry().with(layer).try_init()
        }
    };
    if let Err(error) = installed {
        tracing::debug!(%error, "tracing subscriber already installed");
    }
    Ok(())
}
