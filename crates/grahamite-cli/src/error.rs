use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] grahamite_core::ValidationError),

    #[error("ticker file {path:?} could not be read: {reason}")]
    MissingTickers { path: PathBuf, reason: String },

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::MissingTickers { .. } => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
