//! Voice data types shared between the engine contract and the session layer

use serde::{Deserialize, Serialize};

/// Gender of a voice.
///
/// Discriminants match the engine's native encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Gender {
    #[default]
    Unknown = 0,
    Male = 1,
    Female = 2,
    Neutral = 3,
}

/// A language supported by a voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Priority of the voice for this language. Lower numbers mean the
    /// engine prefers this voice when the language alone is requested.
    pub priority: u8,
    /// Language name, often but not necessarily in BCP 47 form.
    pub name: String,
}

/// A voice as reported by the engine.
///
/// Returned fresh by every catalog query; never aliases engine-internal
/// state, so callers may mutate or retain it freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Name of this voice, unique within the engine's catalog.
    pub name: String,
    /// Languages this voice speaks, in engine-reported order.
    pub languages: Vec<Language>,
    /// Engine-internal identifier, typically the voice file path within
    /// the engine's data directory.
    pub identifier: String,
    pub gender: Gender,
    /// Age in years, or 0 if not specified.
    pub age: u8,
}

/// Partial voice selection pushed to the engine.
///
/// Zero/empty fields are unconstrained: an all-default query matches the
/// engine's default voice. `variant` disambiguates when the other fields
/// match more than one voice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceQuery {
    pub name: String,
    pub language: String,
    pub gender: Gender,
    pub age: u8,
    pub variant: u8,
}
