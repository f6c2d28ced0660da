//! The synthesis session

use tracing::debug;

use calliope_tts::{EventDecoder, Gender, SynthEvent, SynthesisSink, VoiceQuery};

use crate::error::{SessionError, SessionResult};
use crate::handle::EngineHandle;

/// Default speaking rate in words per minute.
pub const DEFAULT_RATE: i32 = 175;
/// Default volume as a percent of the engine's normal loudness.
pub const DEFAULT_VOLUME: i32 = 100;
/// Default base pitch.
pub const DEFAULT_PITCH: i32 = 50;
/// Default pitch range.
pub const DEFAULT_RANGE: i32 = 50;

/// One caller's synthesis session: speech parameters, a voice query, and
/// the output of the most recent synthesis call.
///
/// A `Context` stores parameters locally and pushes them to the engine at
/// synthesis time, so what the session remembers is decoupled from what
/// the engine currently has loaded. Distinct contexts sharing one
/// [`EngineHandle`] may be driven from different threads; they serialize
/// only on the handle's gate. A single context takes `&mut self` for
/// synthesis, so it cannot be driven concurrently.
#[derive(Debug)]
pub struct Context {
    handle: EngineHandle,

    rate: i32,   // words per minute, 80 to 450
    volume: i32, // percent of normal volume, min 0
    pitch: i32,  // base pitch, 0 to 100
    tone: i32,   // pitch range, 0 to 100; 0 is monotone

    voice: VoiceQuery,

    samples: Vec<i16>,
    events: Vec<SynthEvent>,
}

impl Context {
    /// Creates a session with default parameters (rate 175, volume 100,
    /// pitch 50, range 50) and an unconstrained voice query.
    pub fn new(handle: EngineHandle) -> Self {
        Self {
            handle,
            rate: DEFAULT_RATE,
            volume: DEFAULT_VOLUME,
            pitch: DEFAULT_PITCH,
            tone: DEFAULT_RANGE,
            voice: VoiceQuery::default(),
            samples: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Current speed of speech in words per minute.
    pub fn rate(&self) -> i32 {
        self.rate
    }

    /// Changes the speed of speech for future synthesis calls.
    ///
    /// # Panics
    ///
    /// Panics unless `wpm` is between 80 and 450, inclusive.
    pub fn set_rate(&mut self, wpm: i32) {
        assert!(
            (80..=450).contains(&wpm),
            "rate must be between 80 and 450 words per minute, got {wpm}"
        );
        self.rate = wpm;
    }

    /// Current loudness as a percent of the engine's normal volume.
    pub fn volume(&self) -> i32 {
        self.volume
    }

    /// Changes the loudness for future synthesis calls. Values over 100
    /// may cause distortion or clipping.
    ///
    /// # Panics
    ///
    /// Panics if `percent` is negative.
    pub fn set_volume(&mut self, percent: i32) {
        assert!(percent >= 0, "volume must not be negative, got {percent}");
        self.volume = percent;
    }

    /// Current base pitch, 0 (very low) to 100 (very high).
    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Changes the base pitch for future synthesis calls. The voice's
    /// original pitch is 50.
    ///
    /// # Panics
    ///
    /// Panics unless `pitch` is between 0 and 100, inclusive.
    pub fn set_pitch(&mut self, pitch: i32) {
        assert!(
            (0..=100).contains(&pitch),
            "pitch must be between 0 and 100, got {pitch}"
        );
        self.pitch = pitch;
    }

    /// Current pitch range. 0 is monotone.
    pub fn range(&self) -> i32 {
        self.tone
    }

    /// Changes the pitch range for future synthesis calls, from 0
    /// (monotone) to 100. The voice's original range is 50.
    ///
    /// # Panics
    ///
    /// Panics unless `tone` is between 0 and 100, inclusive.
    pub fn set_range(&mut self, tone: i32) {
        assert!(
            (0..=100).contains(&tone),
            "range must be between 0 and 100, got {tone}"
        );
        self.tone = tone;
    }

    /// Selects a voice by name for future synthesis calls.
    pub fn set_voice(&mut self, name: &str) -> SessionResult<()> {
        if name.is_empty() {
            return Err(SessionError::MissingVoiceName);
        }
        self.set_voice_properties(name, "", Gender::Unknown, 0, 0)
    }

    /// Selects a voice for future synthesis calls by any combination of
    /// properties. Zero/empty arguments are unconstrained; `variant`
    /// disambiguates when more than one voice matches the rest.
    ///
    /// The candidate query is validated against the engine first: if no
    /// voice matches, the error is returned and the session's previously
    /// configured voice query is left unchanged.
    pub fn set_voice_properties(
        &mut self,
        name: &str,
        language: &str,
        gender: Gender,
        age: u8,
        variant: u8,
    ) -> SessionResult<()> {
        let query = VoiceQuery {
            name: name.to_owned(),
            language: language.to_owned(),
            gender,
            age,
            variant,
        };
        self.handle.validate_voice(&query)?;
        self.voice = query;
        Ok(())
    }

    /// Audio produced by the most recent synthesis call, as 16-bit signed
    /// PCM at the engine's sample rate.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Events produced by the most recent synthesis call, in audio order.
    pub fn events(&self) -> &[SynthEvent] {
        &self.events
    }

    /// Converts `text` to speech, replacing [`samples`](Self::samples)
    /// and [`events`](Self::events) with this utterance's output.
    ///
    /// Holds the engine gate for the whole call. The session's rate,
    /// volume, pitch, range, and voice query are pushed to the engine in
    /// that order before synthesis starts; the first push failure aborts
    /// the call, leaving the session's stored parameters untouched. SSML
    /// markup in `text` is passed through to the engine as-is.
    ///
    /// # Panics
    ///
    /// Panics if the engine delivers malformed event-record bytes; see
    /// [`EventDecoder::feed`].
    pub fn synthesize_text(&mut self, text: &str) -> SessionResult<()> {
        self.samples.clear();
        self.events.clear();

        debug!(
            chars = text.chars().count(),
            rate = self.rate,
            volume = self.volume,
            pitch = self.pitch,
            range = self.tone,
            "starting synthesis"
        );

        self.handle.with_engine(|engine| {
            engine.set_rate(self.rate)?;
            engine.set_volume(self.volume)?;
            engine.set_pitch(self.pitch)?;
            engine.set_tone(self.tone)?;
            engine.set_voice(&self.voice)?;

            let mut sink = ContextSink {
                samples: &mut self.samples,
                events: &mut self.events,
                decoder: EventDecoder::new(),
            };
            engine.synthesize(text, &mut sink)
        })?;

        debug!(
            samples = self.samples.len(),
            events = self.events.len(),
            "synthesis complete"
        );
        Ok(())
    }
}

/// Streaming sink for one synthesis call: sample chunks are appended
/// verbatim, event blocks go through the decoder.
struct ContextSink<'a> {
    samples: &'a mut Vec<i16>,
    events: &'a mut Vec<SynthEvent>,
    decoder: EventDecoder,
}

impl SynthesisSink for ContextSink<'_> {
    fn samples(&mut self, chunk: &[i16]) {
        self.samples.extend_from_slice(chunk);
    }

    fn event_block(&mut self, raw: &[u8]) {
        self.decoder.feed(raw, self.events);
    }
}
