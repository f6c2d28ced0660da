//! Stateful synthesis sessions over a shared speech engine
//!
//! A process holds one engine behind an [`EngineHandle`]; any number of
//! [`Context`] sessions may be created from clones of that handle and
//! driven from different threads. Every engine-touching operation runs
//! under the handle's single serialization gate, because the engine is
//! not reentrant: parameter pushes, voice-catalog queries, and whole
//! synthesis calls (including their streaming callbacks) never
//! interleave.
//!
//! ```no_run
//! # use calliope_session::{Context, EngineHandle};
//! # use calliope_tts::{EngineResult, SpeechEngine, SynthesisSink, Voice, VoiceQuery};
//! # struct Engine;
//! # impl SpeechEngine for Engine {
//! #     fn set_rate(&mut self, _: i32) -> EngineResult<()> { Ok(()) }
//! #     fn set_volume(&mut self, _: i32) -> EngineResult<()> { Ok(()) }
//! #     fn set_pitch(&mut self, _: i32) -> EngineResult<()> { Ok(()) }
//! #     fn set_tone(&mut self, _: i32) -> EngineResult<()> { Ok(()) }
//! #     fn set_voice(&mut self, _: &VoiceQuery) -> EngineResult<()> { Ok(()) }
//! #     fn list_voices(&mut self) -> Vec<Voice> { Vec::new() }
//! #     fn sample_rate(&mut self) -> u32 { 22_050 }
//! #     fn synthesize(&mut self, _: &str, _: &mut dyn SynthesisSink) -> EngineResult<()> { Ok(()) }
//! # }
//! let handle = EngineHandle::new(Engine);
//! let mut ctx = Context::new(handle.clone());
//! ctx.set_rate(200);
//! ctx.synthesize_text("Hello world.")?;
//! let pcm: &[i16] = ctx.samples();
//! # Ok::<(), calliope_session::SessionError>(())
//! ```

pub mod catalog;
pub mod context;
pub mod error;
pub mod handle;

// Public API
pub use context::Context;
pub use error::{SessionError, SessionResult};
pub use handle::EngineHandle;
