use std::result::Result as StdResult;

use thiserror::Error;

use crate::ledger::CollectionKind;

/// Unified error type for the ledger, storage and configuration layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{kind} category `{name}` already exists")]
    DuplicateName { kind: CollectionKind, name: String },
    #[error("{kind} category `{name}` not found")]
    NotFound { kind: CollectionKind, name: String },
    #[error("Invalid amount: `{0}` is not a valid number")]
    InvalidAmount(String),
    #[error("Invalid category name: {0}")]
    InvalidName(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    /// Validation failures the prompt recovers from by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TrackerError::DuplicateName { .. }
                | TrackerError::InvalidAmount(_)
                | TrackerError::InvalidName(_)
        )
    }
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Persistence(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Input(err.to_string())
    }
}
