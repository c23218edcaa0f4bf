use std::io;
use std::path::PathBuf;

use sortviz_core::{ConfigError, CoreError};
use sortviz_render::RenderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot acquire terminal: {0}")]
    Terminal(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("producer thread panicked")]
    ProducerPanicked,

    #[error(transparent)]
    Core(CoreError),
}

impl AppError {
    /// Process exit status for this error. Usage errors exit with 2, like
    /// the ones clap reports itself.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::ProducerPanicked => Self::ProducerPanicked,
            CoreError::Config(error) => Self::Config(error),
            CoreError::Io(error) => Self::Io(error),
            other => Self::Core(other),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(error: RenderError) -> Self {
        match error {
            RenderError::Terminal(error) => Self::Terminal(error),
            RenderError::Io(error) => Self::Io(error),
            RenderError::Core(error) => error.into(),
        }
    }
}
