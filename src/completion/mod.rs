//! Completion action dispatch.
//!
//! When a Pomodoro countdown reaches zero the engine hands the configured
//! [`CompletionConfig`] to [`CompletionDispatcher::execute`], which runs
//! exactly one of the four actions. Failures never reach the engine; an
//! unplayable sound degrades to the system beep and a failed speech attempt
//! is only logged.

mod message;
mod speech;

use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::sound::{create_player, get_alert_sound, SoundPlayer, SoundSource};
use crate::types::{CompletionAction, CompletionConfig};

pub use message::{CompletionMessage, MESSAGE_DURATION};
pub use speech::{say_exists, MockSpeech, SaySpeech, SpeechError, SpeechService};

// ============================================================================
// AlertService
// ============================================================================

/// Plays the system alert sound.
pub trait AlertService {
    /// Fires the alert without waiting for it to finish.
    fn beep(&self);
}

impl<T: AlertService + ?Sized> AlertService for Rc<T> {
    fn beep(&self) {
        (**self).beep();
    }
}

/// Alert that plays the default system sound, or rings the terminal bell
/// when nothing can be played.
pub struct SoundAlert {
    player: Rc<dyn SoundPlayer>,
    source: SoundSource,
}

/// How a [`SoundAlert`] was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSignal {
    Played,
    Bell,
    /// Sound is disabled; nothing was emitted.
    Muted,
}

impl SoundAlert {
    #[must_use]
    pub fn new(player: Rc<dyn SoundPlayer>) -> Self {
        Self {
            player,
            source: get_alert_sound(),
        }
    }

    /// Plays the alert sound, ringing the terminal bell when it cannot be
    /// played. A disabled player emits nothing.
    pub fn signal(&self) -> AlertSignal {
        if self.player.is_disabled() {
            debug!("Sound disabled, alert muted");
            return AlertSignal::Muted;
        }
        match self.player.play(&self.source) {
            Ok(()) => AlertSignal::Played,
            Err(e) => {
                debug!("Alert sound unavailable ({}), ringing terminal bell", e);
                ring_terminal_bell();
                AlertSignal::Bell
            }
        }
    }
}

impl AlertService for SoundAlert {
    fn beep(&self) {
        self.signal();
    }
}

/// Writes the BEL character to stderr.
pub fn ring_terminal_bell() {
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(b"\x07");
    let _ = stderr.flush();
}

/// Mock alert for testing.
#[derive(Debug, Default)]
pub struct MockAlert {
    beeps: AtomicUsize,
}

impl MockAlert {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn beep_count(&self) -> usize {
        self.beeps.load(Ordering::SeqCst)
    }
}

impl AlertService for MockAlert {
    fn beep(&self) {
        self.beeps.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// CompletionDispatcher
// ============================================================================

/// What a completion dispatch actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Beeped,
    Spoke,
    /// Speech could not start; the failure was logged and ignored.
    SpeechFailed,
    MessageShown,
    SoundPlayed,
    /// The sound path was empty or unplayable.
    FellBackToBeep,
    /// A Beep or PlaySound action ran with sound disabled.
    Muted,
}

/// Runs the configured completion action through injected collaborators.
pub struct CompletionDispatcher {
    player: Rc<dyn SoundPlayer>,
    speech: Box<dyn SpeechService>,
    alert: Box<dyn AlertService>,
}

impl CompletionDispatcher {
    pub fn new(
        player: Rc<dyn SoundPlayer>,
        speech: Box<dyn SpeechService>,
        alert: Box<dyn AlertService>,
    ) -> Self {
        Self {
            player,
            speech,
            alert,
        }
    }

    /// Dispatcher backed by the real audio device, `say` and the system
    /// alert sound. With `sound_disabled` nothing is played.
    #[must_use]
    pub fn system(sound_disabled: bool) -> Self {
        let player: Rc<dyn SoundPlayer> = Rc::from(create_player(sound_disabled));
        let alert = SoundAlert::new(Rc::clone(&player));
        Self::new(player, Box::new(SaySpeech), Box::new(alert))
    }

    /// Runs exactly one action for `completion`.
    ///
    /// `message` is updated for [`CompletionAction::ShowMessage`] and left
    /// untouched otherwise.
    pub fn execute(
        &self,
        completion: &CompletionConfig,
        message: &mut CompletionMessage,
        now: Instant,
    ) -> CompletionOutcome {
        info!(action = completion.action.as_str(), "Running completion action");

        match completion.action {
            CompletionAction::Beep | CompletionAction::PlaySound if self.player.is_disabled() => {
                debug!("Sound disabled, skipping audible completion");
                CompletionOutcome::Muted
            }
            CompletionAction::Beep => {
                self.alert.beep();
                CompletionOutcome::Beeped
            }
            CompletionAction::SpeakText => match self.speech.speak(&completion.text) {
                Ok(()) => CompletionOutcome::Spoke,
                Err(e) => {
                    warn!("Speech failed: {} ({})", e, e.suggestion());
                    CompletionOutcome::SpeechFailed
                }
            },
            CompletionAction::ShowMessage => {
                message.show(completion.text.clone(), now);
                CompletionOutcome::MessageShown
            }
            CompletionAction::PlaySound => self.play_sound(&completion.sound_path),
        }
    }

    fn play_sound(&self, sound_path: &str) -> CompletionOutcome {
        if sound_path.trim().is_empty() {
            debug!("No sound file configured, beeping instead");
            self.alert.beep();
            return CompletionOutcome::FellBackToBeep;
        }

        let source = SoundSource::file(Path::new(sound_path));
        match self.player.play(&source) {
            Ok(()) => CompletionOutcome::SoundPlayed,
            Err(e) => {
                warn!("Could not play '{}': {} ({})", sound_path, e, e.suggestion());
                self.alert.beep();
                CompletionOutcome::FellBackToBeep
            }
        }
    }
}

impl std::fmt::Debug for CompletionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionDispatcher")
            .field("sound_available", &self.player.is_available())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;

    struct Fixture {
        player: Rc<MockSoundPlayer>,
        speech: Rc<MockSpeech>,
        alert: Rc<MockAlert>,
        dispatcher: CompletionDispatcher,
    }

    fn fixture() -> Fixture {
        let player = Rc::new(MockSoundPlayer::new());
        let speech = Rc::new(MockSpeech::new());
        let alert = Rc::new(MockAlert::new());
        let dispatcher = CompletionDispatcher::new(
            player.clone(),
            Box::new(Rc::clone(&speech)),
            Box::new(Rc::clone(&alert)),
        );
        Fixture {
            player,
            speech,
            alert,
            dispatcher,
        }
    }

    fn config(action: CompletionAction) -> CompletionConfig {
        CompletionConfig {
            action,
            ..CompletionConfig::default()
        }
    }

    mod dispatch_tests {
        use super::*;

        #[test]
        fn test_beep() {
            let f = fixture();
            let mut message = CompletionMessage::default();

            let outcome =
                f.dispatcher
                    .execute(&config(CompletionAction::Beep), &mut message, Instant::now());

            assert_eq!(outcome, CompletionOutcome::Beeped);
            assert_eq!(f.alert.beep_count(), 1);
            assert_eq!(f.player.play_count(), 0);
            assert!(f.speech.spoken().is_empty());
            assert!(!message.is_visible());
        }

        #[test]
        fn test_speak_text() {
            let f = fixture();
            let mut completion = config(CompletionAction::SpeakText);
            completion.text = "Break time".to_string();

            let outcome = f.dispatcher.execute(
                &completion,
                &mut CompletionMessage::default(),
                Instant::now(),
            );

            assert_eq!(outcome, CompletionOutcome::Spoke);
            assert_eq!(f.speech.spoken(), vec!["Break time".to_string()]);
            assert_eq!(f.alert.beep_count(), 0);
        }

        #[test]
        fn test_speech_failure_is_ignored() {
            let f = fixture();
            f.speech.set_should_fail(true);

            let outcome = f.dispatcher.execute(
                &config(CompletionAction::SpeakText),
                &mut CompletionMessage::default(),
                Instant::now(),
            );

            assert_eq!(outcome, CompletionOutcome::SpeechFailed);
            assert_eq!(f.alert.beep_count(), 0);
        }

        #[test]
        fn test_show_message() {
            let f = fixture();
            let mut completion = config(CompletionAction::ShowMessage);
            completion.text = "Done".to_string();
            let mut message = CompletionMessage::default();
            let now = Instant::now();

            let outcome = f.dispatcher.execute(&completion, &mut message, now);

            assert_eq!(outcome, CompletionOutcome::MessageShown);
            assert!(message.is_visible());
            assert_eq!(message.text(), "Done");
            assert_eq!(message.deadline(), Some(now + MESSAGE_DURATION));
            assert_eq!(f.alert.beep_count(), 0);
        }

        #[test]
        fn test_play_sound() {
            let f = fixture();
            let mut completion = config(CompletionAction::PlaySound);
            completion.sound_path = "/Users/me/gong.aiff".to_string();

            let outcome = f.dispatcher.execute(
                &completion,
                &mut CompletionMessage::default(),
                Instant::now(),
            );

            assert_eq!(outcome, CompletionOutcome::SoundPlayed);
            assert_eq!(
                f.player.get_play_calls(),
                vec![SoundSource::file("/Users/me/gong.aiff")]
            );
            assert_eq!(f.alert.beep_count(), 0);
        }

        #[test]
        fn test_play_sound_empty_path_beeps() {
            let f = fixture();

            let outcome = f.dispatcher.execute(
                &config(CompletionAction::PlaySound),
                &mut CompletionMessage::default(),
                Instant::now(),
            );

            assert_eq!(outcome, CompletionOutcome::FellBackToBeep);
            assert_eq!(f.player.play_count(), 0);
            assert_eq!(f.alert.beep_count(), 1);
        }

        #[test]
        fn test_play_sound_failure_beeps() {
            let f = fixture();
            f.player.set_should_fail(true);
            let mut completion = config(CompletionAction::PlaySound);
            completion.sound_path = "/missing.wav".to_string();

            let outcome = f.dispatcher.execute(
                &completion,
                &mut CompletionMessage::default(),
                Instant::now(),
            );

            assert_eq!(outcome, CompletionOutcome::FellBackToBeep);
            assert_eq!(f.alert.beep_count(), 1);
        }

        #[test]
        fn test_disabled_sound_mutes_beep_and_play_sound() {
            let f = fixture();
            f.player.set_disabled(true);
            let mut completion = config(CompletionAction::PlaySound);
            completion.sound_path = "/Users/me/gong.aiff".to_string();

            let played = f.dispatcher.execute(
                &completion,
                &mut CompletionMessage::default(),
                Instant::now(),
            );
            let beeped = f.dispatcher.execute(
                &config(CompletionAction::Beep),
                &mut CompletionMessage::default(),
                Instant::now(),
            );

            assert_eq!(played, CompletionOutcome::Muted);
            assert_eq!(beeped, CompletionOutcome::Muted);
            assert_eq!(f.alert.beep_count(), 0);
            assert_eq!(f.player.play_count(), 0);
        }

        #[test]
        fn test_disabled_sound_still_shows_message() {
            let f = fixture();
            f.player.set_disabled(true);
            let mut message = CompletionMessage::default();

            let outcome = f.dispatcher.execute(
                &config(CompletionAction::ShowMessage),
                &mut message,
                Instant::now(),
            );

            assert_eq!(outcome, CompletionOutcome::MessageShown);
            assert!(message.is_visible());
        }
    }

    mod alert_tests {
        use super::*;
        use crate::sound::NullSoundPlayer;

        #[test]
        fn test_sound_alert_plays_alert_source() {
            let player = Rc::new(MockSoundPlayer::new());
            let alert = SoundAlert::new(player.clone());

            assert_eq!(alert.signal(), AlertSignal::Played);
            assert_eq!(player.play_count(), 1);
        }

        #[test]
        fn test_sound_alert_survives_player_failure() {
            let player = Rc::new(MockSoundPlayer::new());
            player.set_should_fail(true);
            let alert = SoundAlert::new(player.clone());

            assert_eq!(alert.signal(), AlertSignal::Bell);
            assert_eq!(player.play_count(), 0);
        }

        #[test]
        fn test_no_device_without_sound_disabled_rings_bell() {
            let alert = SoundAlert::new(Rc::new(NullSoundPlayer::new(false)));
            assert_eq!(alert.signal(), AlertSignal::Bell);
        }

        #[test]
        fn test_sound_disabled_alert_is_silent() {
            let alert = SoundAlert::new(Rc::from(create_player(true)));
            assert_eq!(alert.signal(), AlertSignal::Muted);
        }

        #[test]
        fn test_disabled_player_is_not_played() {
            let player = Rc::new(MockSoundPlayer::new());
            player.set_disabled(true);
            player.set_should_fail(true);
            let alert = SoundAlert::new(player.clone());

            assert_eq!(alert.signal(), AlertSignal::Muted);
        }
    }
}
