use std::io;

use sortviz_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Raw mode or the alternate screen could not be entered.
    #[error("failed to acquire terminal: {0}")]
    Terminal(#[source] io::Error),

    #[error("render I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
