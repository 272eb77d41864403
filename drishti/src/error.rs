//! Error types for Drishti

use thiserror::Error;

/// Drishti error type
#[derive(Error, Debug)]
pub enum DrishtiError {
    /// Malformed grid metadata, display parameters or payload values.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A conversion needed a map epoch before any map arrived.
    #[error("Stale input: {0}")]
    StaleInput(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reported by a command transport port.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl DrishtiError {
    /// Shorthand for [`DrishtiError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        DrishtiError::InvalidArgument(msg.into())
    }

    /// True for the startup race where no map has been received yet.
    pub fn is_stale(&self) -> bool {
        matches!(self, DrishtiError::StaleInput(_))
    }
}

impl From<serde_json::Error> for DrishtiError {
    fn from(e: serde_json::Error) -> Self {
        DrishtiError::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for DrishtiError {
    fn from(e: serde_yaml::Error) -> Self {
        DrishtiError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrishtiError>;
