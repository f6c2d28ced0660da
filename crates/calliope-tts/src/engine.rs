//! Speech engine contract
//!
//! Implementations wrap a concrete synthesis engine (native binding,
//! subprocess, remote service). The engine is assumed non-reentrant:
//! callers must ensure only one operation is in flight per engine
//! instance, process-wide. The session layer enforces this with a single
//! serialization gate; implementations do not need their own locking.

use crate::error::EngineResult;
use crate::types::{Voice, VoiceQuery};

/// Receiver for the interleaved output of a synthesis call.
///
/// The engine invokes the sink strictly synchronously within
/// [`SpeechEngine::synthesize`], in emission order.
pub trait SynthesisSink {
    /// A chunk of 16-bit signed PCM samples.
    fn samples(&mut self, chunk: &[i16]);

    /// A block of raw fixed-layout event records, terminated by the
    /// engine's list-terminated sentinel record.
    fn event_block(&mut self, raw: &[u8]);
}

/// The narrow contract the session layer requires from an engine.
pub trait SpeechEngine: Send {
    /// Sets the speaking rate in words per minute.
    fn set_rate(&mut self, wpm: i32) -> EngineResult<()>;

    /// Sets loudness as a percentage of the engine's normal volume.
    fn set_volume(&mut self, percent: i32) -> EngineResult<()>;

    /// Sets the base pitch, 0 (very low) to 100 (very high).
    fn set_pitch(&mut self, pitch: i32) -> EngineResult<()>;

    /// Sets the pitch range, 0 (monotone) to 100.
    fn set_tone(&mut self, tone: i32) -> EngineResult<()>;

    /// Selects a voice. Fails if no voice matches the query.
    fn set_voice(&mut self, query: &VoiceQuery) -> EngineResult<()>;

    /// The engine's current voice inventory, in engine-reported order.
    fn list_voices(&mut self) -> Vec<Voice>;

    /// Samples per second in generated audio.
    fn sample_rate(&mut self) -> u32;

    /// Synthesizes `text` with the currently applied parameters and voice,
    /// delivering samples and event records through `sink` until the
    /// utterance completes. SSML markup in `text` is interpreted by the
    /// engine; unsupported tags are ignored there, not here.
    fn synthesize(&mut self, text: &str, sink: &mut dyn SynthesisSink) -> EngineResult<()>;
}
