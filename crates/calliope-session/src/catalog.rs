//! Voice catalog queries
//!
//! Catalog operations defer to the engine on every call rather than
//! caching: the engine's voice set is the only source of truth and is not
//! known to be immutable at runtime. Ordering is whatever the engine
//! reports; callers needing a particular order sort the result themselves.

use tracing::debug;

use calliope_tts::{EngineResult, Voice, VoiceQuery};

use crate::handle::EngineHandle;

impl EngineHandle {
    /// Returns the engine's complete voice inventory.
    ///
    /// The returned vector is freshly allocated on every call and shares
    /// nothing with engine-internal state, so callers may modify it
    /// without side effects.
    pub fn list_voices(&self) -> Vec<Voice> {
        let voices = self.with_engine(|engine| engine.list_voices());
        debug!(count = voices.len(), "listed engine voices");
        voices
    }

    /// Samples per second in audio generated by the engine.
    pub fn sample_rate(&self) -> u32 {
        self.with_engine(|engine| engine.sample_rate())
    }

    /// Checks that at least one voice matches `query` by pushing it to
    /// the engine's voice selection. Leaves no session-visible state
    /// behind; the engine's selected voice is re-pushed by every
    /// synthesis call anyway.
    pub(crate) fn validate_voice(&self, query: &VoiceQuery) -> EngineResult<()> {
        self.with_engine(|engine| engine.set_voice(query))
    }
}
