//! Typed synthesis events decoded from the engine's raw record stream

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A synthesis milestone reported by the engine.
///
/// Events arrive in audio order during a synthesis call and describe word
/// and sentence boundaries, SSML markers, and (when enabled) phonemes.
/// They are useful, for example, for generating real-time subtitles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthEvent {
    /// Character offset into the submitted text, starting at 1.
    pub text_position: u32,
    /// Time offset within the generated audio.
    pub audio_position: Duration,
    pub kind: EventKind,
}

/// Per-event payload, keyed by the engine's event type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Start of a word.
    Word {
        /// Length of the word in characters.
        length: u32,
        number: i32,
    },
    /// Start of a sentence.
    Sentence { number: i32 },
    /// A `<mark/>` element in SSML input.
    Mark { name: String },
    /// An `<audio/>` element in SSML input.
    Play { name: String },
    /// End of a sentence or clause.
    End,
    /// End of the synthesized message.
    MsgTerminated,
    /// One phoneme, emitted only when phoneme events are enabled.
    Phoneme { phoneme: String },
}

impl SynthEvent {
    /// True for the events that end an utterance.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::MsgTerminated)
    }
}
