//! The serialization gate around the shared engine

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use calliope_tts::SpeechEngine;

/// Cloneable handle to the process-wide engine instance.
///
/// The engine is non-reentrant, so every call into it happens while
/// holding the handle's single mutex; for a synthesis call the lock is
/// held across the entire streaming callback lifetime. Acquisition is
/// blocking and not cancellable. The lock itself is never exposed.
///
/// The mutex does not poison: a panicking synthesis call (a decoder
/// consistency fault) leaves other sessions able to continue.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<Mutex<Box<dyn SpeechEngine>>>,
}

impl EngineHandle {
    pub fn new(engine: impl SpeechEngine + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(engine))),
        }
    }

    /// Runs `f` with exclusive access to the engine.
    pub(crate) fn with_engine<T>(&self, f: impl FnOnce(&mut dyn SpeechEngine) -> T) -> T {
        let mut engine = self.inner.lock();
        f(engine.as_mut())
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle").finish_non_exhaustive()
    }
}
