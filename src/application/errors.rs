//! Application layer errors

use thiserror::Error;

use crate::domain::entities::Flag;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    UnknownFlag(#[from] UnknownFlagError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for BotError {
    fn from(e: std::io::Error) -> Self {
        BotError::Network(e.to_string())
    }
}

/// Raised when a flag is neither a known name nor a known code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown flag! Valid flags are {}", Flag::valid_codes())]
pub struct UnknownFlagError {
    pub flag: String,
}

impl UnknownFlagError {
    pub fn new(flag: impl Into<String>) -> Self {
        Self { flag: flag.into() }
    }
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store already closed")]
    Closed,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
