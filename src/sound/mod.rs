//! Sound playback for completion alerts.
//!
//! This module provides audio capabilities, including:
//!
//! - System sound discovery and playback
//! - User-selected sound files
//! - A generated tone when no sound file is available
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  System Sounds   │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  User File       │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Sine Tone       │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use lazytimer::sound::{create_player, SoundPlayer, SoundSource};
//!
//! let player = create_player(false);
//! player
//!     .play(&SoundSource::file("/Users/me/Music/gong.mp3"))
//!     .unwrap_or_else(|e| eprintln!("{}", e));
//! ```

mod error;
mod player;
mod source;

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
use player::try_create_player;

pub use player::RodioSoundPlayer;
pub use source::{discover_system_sounds, find_system_sound, get_alert_sound, SoundSource};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    ///
    /// A disabled player accepts every `play` call and stays silent.
    fn is_disabled(&self) -> bool;
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Rc<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }
}

/// Player used when no audio device exists. Unless disabled, every play
/// attempt fails so callers fall back to the terminal bell.
#[derive(Debug, Default)]
pub struct NullSoundPlayer {
    disabled: bool,
}

impl NullSoundPlayer {
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self { disabled }
    }
}

impl SoundPlayer for NullSoundPlayer {
    fn play(&self, _source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled {
            return Ok(());
        }
        Err(SoundError::DeviceNotAvailable(
            "no audio output device".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Creates the best available player: rodio when an output device exists,
/// otherwise [`NullSoundPlayer`].
#[must_use]
pub fn create_player(disabled: bool) -> Box<dyn SoundPlayer> {
    match try_create_player(disabled) {
        Some(player) => Box::new(player),
        None => Box::new(NullSoundPlayer::new(disabled)),
    }
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    available: AtomicBool,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            disabled: AtomicBool::new(false),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}
