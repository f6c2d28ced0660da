//! Engine-facing core for Calliope
//!
//! This crate defines the narrow contract a speech engine must satisfy
//! (`SpeechEngine`), the voice and event data types shared with the session
//! layer, and the decoder that turns the engine's raw fixed-layout event
//! records into typed `SynthEvent` values. It knows nothing about sessions
//! or locking; that lives in `calliope-session`.

pub mod decoder;
pub mod engine;
pub mod error;
pub mod event;
pub mod types;

// Public API
pub use decoder::EventDecoder;
pub use engine::{SpeechEngine, SynthesisSink};
pub use error::{EngineError, EngineResult};
pub use event::{EventKind, SynthEvent};
pub use types::{Gender, Language, Voice, VoiceQuery};
