//! Error types for the life engine

use thiserror::Error;

/// Errors produced by pattern handling, seeding and snapshot export
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("coordinate overflow seeding at ({x}, {y})")]
    CoordinateOverflow { x: i64, y: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
