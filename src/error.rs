//! Error types for wizardnav

use crate::grid::Position;
use thiserror::Error;

/// wizardnav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("position {position} is outside the {cols}x{rows} grid")]
    OutOfBounds {
        position: Position,
        cols: i32,
        rows: i32,
    },

    #[error("objective {objective}: no route from {from} to {to}")]
    Unreachable {
        objective: usize,
        from: Position,
        to: Position,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
