//! Text-to-speech for the "Speak Text" completion action.
//!
//! Speech runs through the macOS `say` tool. The process is spawned and
//! left to finish on its own so a long sentence never holds up the timer.

use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Path to the speech synthesis command-line tool.
const SAY_PATH: &str = "/usr/bin/say";

/// Errors from the speech collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// The `say` tool is not installed.
    #[error("speech synthesizer not found at {0}")]
    SynthesizerNotFound(String),

    /// The synthesizer process could not be started.
    #[error("failed to start speech synthesizer: {0}")]
    SpawnFailed(String),
}

impl SpeechError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SynthesizerNotFound(_) => "speech is only available on macOS",
            Self::SpawnFailed(_) => "check that the speech synthesizer can run from a terminal",
        }
    }
}

/// Speaks text aloud.
pub trait SpeechService {
    /// Starts speaking `text` and returns without waiting for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if speech could not be started.
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

impl<T: SpeechService + ?Sized> SpeechService for Rc<T> {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        (**self).speak(text)
    }
}

/// Checks if the `say` tool is available on this system.
#[must_use]
pub fn say_exists() -> bool {
    Path::new(SAY_PATH).exists()
}

/// Speech through `/usr/bin/say`.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaySpeech;

impl SpeechService for SaySpeech {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if !say_exists() {
            return Err(SpeechError::SynthesizerNotFound(SAY_PATH.to_string()));
        }

        info!("Speaking completion text");
        let child = Command::new(SAY_PATH)
            .arg(text)
            .spawn()
            .map_err(|e| SpeechError::SpawnFailed(e.to_string()))?;
        debug!(pid = ?child.id(), "Speech synthesizer started");

        // Dropping the handle leaves the process running; tokio reaps it.
        drop(child);
        Ok(())
    }
}

/// Mock speech service for testing.
#[derive(Debug, Default)]
pub struct MockSpeech {
    spoken: Mutex<Vec<String>>,
    should_fail: Mutex<bool>,
}

impl MockSpeech {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    #[must_use]
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechService for MockSpeech {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if *self.should_fail.lock().unwrap() {
            return Err(SpeechError::SpawnFailed("Mock failure".to_string()));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
