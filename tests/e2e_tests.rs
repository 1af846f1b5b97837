//! End-to-End Tests for the LazyTimer application actor.
//!
//! These tests drive a real [`App`] with mock collaborators on tokio's
//! paused clock:
//! - Full Pomodoro work session (1500 ticks)
//! - Long break after four work sessions
//! - Stopwatch counting
//! - Completion message auto-dismiss and manual dismiss
//! - Reset and pause stopping the ticker

use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;

use lazytimer::completion::{CompletionDispatcher, CompletionOutcome, MockAlert, MockSpeech};
use lazytimer::engine::{App, AppCommand, AppHandle, AppServices, TimerEvent};
use lazytimer::sound::MockSoundPlayer;
use lazytimer::types::{CompletionAction, SessionType, TimerConfig, TimerMode, TimerSnapshot};
use lazytimer::window::MockSurfaceHost;

// ============================================================================
// Test Helpers
// ============================================================================

struct Harness {
    app: App,
    handle: AppHandle,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    alert: Rc<MockAlert>,
    speech: Rc<MockSpeech>,
}

/// Creates an app with mock collaborators.
fn create_app(config: TimerConfig) -> Harness {
    let alert = Rc::new(MockAlert::new());
    let speech = Rc::new(MockSpeech::new());
    let dispatcher = CompletionDispatcher::new(
        Rc::new(MockSoundPlayer::new()),
        Box::new(Rc::clone(&speech)),
        Box::new(Rc::clone(&alert)),
    );
    let services = AppServices::new(dispatcher, Box::new(MockSurfaceHost::new()));
    let (app, events) = App::new(config, services);
    let handle = app.handle();
    Harness {
        app,
        handle,
        events,
        alert,
        speech,
    }
}

/// Creates a fast configuration (1-minute sessions).
fn create_fast_config() -> TimerConfig {
    TimerConfig::default()
        .with_work_minutes(1)
        .with_short_break_minutes(1)
        .with_long_break_minutes(2)
}

fn drain(events: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut collected = Vec::new();
    while let Ok(event) = events.try_recv() {
        collected.push(event);
    }
    collected
}

fn completions(events: &[TimerEvent]) -> Vec<&TimerEvent> {
    events
        .iter()
        .filter(|e| matches!(e, TimerEvent::SessionCompleted { .. }))
        .collect()
}

async fn sleep_secs(seconds: f64) {
    tokio::time::sleep(Duration::from_secs_f64(seconds)).await;
}

// ============================================================================
// Pomodoro
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_e2e_full_work_session() {
    let mut h = create_app(TimerConfig::default());
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(1499.5).await;
        let before = handle.snapshot();
        sleep_secs(1.0).await;
        let after = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        (before, after)
    };

    let (_, (before, after)) = tokio::join!(h.app.run(), driver);

    assert!(before.is_running);
    assert_eq!(before.pomodoro_remaining_seconds, 1);
    assert_eq!(before.formatted_time, "00:01");

    assert!(!after.is_running);
    assert_eq!(after.session_count, 1);
    assert_eq!(after.current_session, SessionType::ShortBreak);
    assert_eq!(after.pomodoro_remaining_seconds, 300);
    assert_eq!(after.formatted_time, "05:00");

    let events = drain(&mut h.events);
    let ticks = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, 1500);
    assert_eq!(
        completions(&events),
        vec![&TimerEvent::SessionCompleted {
            finished: SessionType::Work,
            next: SessionType::ShortBreak,
            session_count: 1,
            outcome: CompletionOutcome::Beeped,
        }]
    );
    assert_eq!(h.alert.beep_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_long_break_after_four_sessions() {
    let mut h = create_app(create_fast_config());
    let handle = h.handle.clone();

    let driver = async move {
        let mut sessions = Vec::new();
        // Work, Short, Work, Short, Work, Short, Work
        for _ in 0..7 {
            handle.send(AppCommand::Toggle).unwrap();
            sleep_secs(60.5).await;
            sessions.push(handle.snapshot().current_session);
        }
        let last = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        (sessions, last)
    };

    let (_, (sessions, last)) = tokio::join!(h.app.run(), driver);

    assert_eq!(
        sessions,
        vec![
            SessionType::ShortBreak,
            SessionType::Work,
            SessionType::ShortBreak,
            SessionType::Work,
            SessionType::ShortBreak,
            SessionType::Work,
            SessionType::LongBreak,
        ]
    );
    assert_eq!(last.session_count, 4);
    assert_eq!(last.pomodoro_remaining_seconds, 120);
    assert_eq!(completions(&drain(&mut h.events)).len(), 7);
    assert_eq!(h.alert.beep_count(), 7);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_pause_and_resume() {
    let h = create_app(TimerConfig::default());
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(10.5).await;
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(30.0).await;
        let paused = handle.snapshot();
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(5.2).await;
        let resumed = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        (paused, resumed)
    };

    let (_, (paused, resumed)) = tokio::join!(h.app.run(), driver);
    assert!(!paused.is_running);
    assert_eq!(paused.pomodoro_remaining_seconds, 1490);
    assert!(resumed.is_running);
    assert_eq!(resumed.pomodoro_remaining_seconds, 1485);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_reset_is_idempotent() {
    let mut h = create_app(TimerConfig::default());
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(10.5).await;
        handle.send(AppCommand::Reset).unwrap();
        sleep_secs(0.1).await;
        let once = handle.snapshot();
        handle.send(AppCommand::Reset).unwrap();
        sleep_secs(20.0).await;
        let twice = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        (once, twice)
    };

    let (_, (once, twice)) = tokio::join!(h.app.run(), driver);
    assert_eq!(once, twice);
    assert!(!twice.is_running);
    assert_eq!(twice.pomodoro_remaining_seconds, 1500);

    let events = drain(&mut h.events);
    let ticks = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, 10);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_quick_focus_then_run() {
    let h = create_app(TimerConfig::default());
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::SetMode(TimerMode::Clock)).unwrap();
        handle.send(AppCommand::QuickFocus(5)).unwrap();
        sleep_secs(0.1).await;
        let loaded = handle.snapshot();
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(300.5).await;
        let done = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        (loaded, done)
    };

    let (_, (loaded, done)) = tokio::join!(h.app.run(), driver);
    assert_eq!(loaded.mode, TimerMode::Pomodoro);
    assert!(!loaded.is_running);
    assert_eq!(loaded.formatted_time, "05:00");
    assert_eq!(done.session_count, 1);
    assert_eq!(done.current_session, SessionType::ShortBreak);
}

// ============================================================================
// Stopwatch
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_e2e_stopwatch_ninety_seconds() {
    let h = create_app(TimerConfig::default());
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::SetMode(TimerMode::Stopwatch)).unwrap();
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(90.5).await;
        let snapshot = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        snapshot
    };

    let (_, snapshot): (TimerSnapshot, TimerSnapshot) = tokio::join!(h.app.run(), driver);
    assert!(snapshot.is_running);
    assert_eq!(snapshot.stopwatch_elapsed_seconds, 90);
    assert_eq!(snapshot.formatted_time, "01:30");
    // The Pomodoro countdown is untouched.
    assert_eq!(snapshot.pomodoro_remaining_seconds, 1500);
}

// ============================================================================
// Completion actions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_e2e_message_auto_dismiss() {
    let config = create_fast_config()
        .with_completion_action(CompletionAction::ShowMessage)
        .with_completion_text("Done");
    let h = create_app(config);
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(60.5).await;
        let shown = handle.snapshot();
        sleep_secs(4.0).await;
        let still_shown = handle.snapshot();
        sleep_secs(1.0).await;
        let hidden = handle.snapshot();
        handle.send(AppCommand::Shutdown).unwrap();
        (shown, still_shown, hidden)
    };

    let (_, (shown, still_shown, hidden)) = tokio::join!(h.app.run(), driver);
    assert!(shown.is_showing_completion_message);
    assert_eq!(shown.completion_message_text, "Done");
    assert!(still_shown.is_showing_completion_message);
    assert!(!hidden.is_showing_completion_message);
    assert!(hidden.completion_message_text.is_empty());
    assert_eq!(h.alert.beep_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_message_manual_dismiss() {
    let config = TimerConfig::default()
        .with_completion_action(CompletionAction::ShowMessage)
        .with_completion_text("Done");
    let mut h = create_app(config);
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::TestCompletion).unwrap();
        sleep_secs(1.0).await;
        handle.send(AppCommand::DismissMessage).unwrap();
        sleep_secs(0.1).await;
        let dismissed = handle.snapshot();
        sleep_secs(10.0).await;
        handle.send(AppCommand::Shutdown).unwrap();
        dismissed
    };

    let (_, dismissed) = tokio::join!(h.app.run(), driver);
    assert!(!dismissed.is_showing_completion_message);

    let dismissals = drain(&mut h.events)
        .into_iter()
        .filter(|e| *e == TimerEvent::MessageDismissed)
        .count();
    assert_eq!(dismissals, 1);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_speak_on_completion() {
    let config = create_fast_config()
        .with_completion_action(CompletionAction::SpeakText)
        .with_completion_text("Break time");
    let h = create_app(config);
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(60.5).await;
        handle.send(AppCommand::Shutdown).unwrap();
    };

    tokio::join!(h.app.run(), driver);
    assert_eq!(h.speech.spoken(), vec!["Break time".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_e2e_missing_sound_file_beeps() {
    let mut config = create_fast_config().with_completion_action(CompletionAction::PlaySound);
    config.completion.sound_path = String::new();
    let mut h = create_app(config);
    let handle = h.handle.clone();

    let driver = async move {
        handle.send(AppCommand::Toggle).unwrap();
        sleep_secs(60.5).await;
        handle.send(AppCommand::Shutdown).unwrap();
    };

    tokio::join!(h.app.run(), driver);
    assert_eq!(h.alert.beep_count(), 1);
    let events = drain(&mut h.events);
    assert!(events.iter().any(|e| matches!(
        e,
        TimerEvent::SessionCompleted {
            outcome: CompletionOutcome::FellBackToBeep,
            ..
        }
    )));
}
