//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer` plays system sounds, user files and a generated tone.
//! Playback is non-blocking; sinks are detached and keep playing after
//! `play` returns.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

/// Frequency of the generated beep tone in Hz.
const TONE_FREQUENCY: f32 = 880.0;

/// Length of the generated beep tone.
const TONE_DURATION: Duration = Duration::from_millis(180);

/// Volume of the generated beep tone.
const TONE_AMPLITUDE: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// The output stream must stay on the thread that created it, so the player
/// is owned by the application actor rather than shared across threads.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: bool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A system sound that cannot be played falls back to the generated
    /// tone. A user file that cannot be played is reported to the caller,
    /// which decides on the fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded, or if the
    /// output sink cannot be created.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::System { path, name } => {
                debug!("Playing system sound: {}", name);
                self.play_file(path).or_else(|e| {
                    warn!("Failed to play system sound '{}': {}, playing tone", name, e);
                    self.play_tone()
                })
            }
            SoundSource::File { path } => {
                debug!("Playing sound file: {}", path.display());
                self.play_file(path)
            }
            SoundSource::Tone { name } => {
                debug!("Playing tone: {}", name);
                self.play_tone()
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();

        debug!("Sound playback started (detached)");
        Ok(())
    }

    /// Plays the generated beep tone.
    fn play_tone(&self) -> Result<(), SoundError> {
        let tone = SineWave::new(TONE_FREQUENCY)
            .take_duration(TONE_DURATION)
            .amplify(TONE_AMPLITUDE);

        let sink = self.new_sink()?;
        sink.append(tone);
        sink.detach();
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns true if the audio system is available.
    ///
    /// A player only exists once the output stream was opened.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
#[must_use]
pub(super) fn try_create_player(disabled: bool) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
