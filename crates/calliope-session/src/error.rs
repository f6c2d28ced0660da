//! Session-layer error types

use thiserror::Error;

use calliope_tts::EngineError;

/// Errors returned by session operations.
///
/// Out-of-range parameter values are not represented here: those are
/// caller bugs and panic at the offending setter instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The engine rejected an operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// `set_voice` was called with an empty name.
    #[error("no voice name given")]
    MissingVoiceName,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
