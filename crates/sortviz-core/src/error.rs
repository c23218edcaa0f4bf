use thiserror::Error;

use crate::algorithms::Algorithm;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to spawn producer thread: {0}")]
    Spawn(std::io::Error),

    #[error("producer thread panicked")]
    ProducerPanicked,

    #[error("producer thread already joined")]
    AlreadyJoined,
}

/// A run configuration that cannot be executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("items must be a positive integer")]
    ZeroItems,

    #[error("fps must be between 1 and {max}, got {fps}")]
    FpsOutOfRange { fps: u32, max: u32 },
}

/// A sort name that does not match any known algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{name}' (expected one of: {})", Algorithm::names().join(", "))]
pub struct UnknownAlgorithm {
    pub name: String,
}
