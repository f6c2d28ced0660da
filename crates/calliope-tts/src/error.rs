//! Error type for failures reported by a speech engine

use thiserror::Error;

/// An error reported by the engine, carrying its native error code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("engine error {code}: {message}")]
pub struct EngineError {
    /// Code associated with this error in the engine's native API.
    pub code: u32,
    /// Message intended to be read by humans.
    pub message: String,
}

impl EngineError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
