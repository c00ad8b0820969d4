//! Engine errors
//!
//! Only session setup can fail. Once an engine exists every per-frame call
//! succeeds or is a no-op.

use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// Settings failed validation (bad board, empty loadout, ...)
    InvalidConfiguration(String),
    /// Settings JSON could not be parsed
    Parse(serde_json::Error),
    /// Settings file could not be read
    Io(std::io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {reason}")
            }
            EngineError::Parse(err) => write!(f, "failed to parse settings: {err}"),
            EngineError::Io(err) => write!(f, "failed to read settings: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidConfiguration(_) => None,
            EngineError::Parse(err) => Some(err),
            EngineError::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Parse(err)
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err)
    }
}
