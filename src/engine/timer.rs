//! Timer engine.
//!
//! This module provides the core timer functionality:
//! - Toggle, reset, session switch and mode change
//! - One-second ticks for the Pomodoro countdown and the stopwatch
//! - The session-completion state machine (Work → Break → Work)
//! - Event firing for observers
//!
//! The engine does not own a clock. It only tracks whether it holds a tick
//! subscription; the runtime turns that into an interval.

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use super::state::{format_date, TimerState};
use crate::appearance::{preset_at, resolve_background, Background, GradientPreset, ImageLoader};
use crate::completion::{CompletionDispatcher, CompletionMessage, CompletionOutcome};
use crate::types::{DisplayMode, SessionType, TimerConfig, TimerMode, TimerSnapshot};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Timer started running
    Started {
        /// Mode that started
        mode: TimerMode,
    },
    /// Timer paused by the user
    Paused,
    /// One second elapsed on the Pomodoro countdown
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// One second elapsed on the stopwatch
    StopwatchTick {
        /// Elapsed seconds
        elapsed_seconds: u64,
    },
    /// A Pomodoro countdown reached zero
    SessionCompleted {
        /// Session that just ended
        finished: SessionType,
        /// Session now loaded (paused)
        next: SessionType,
        /// Completed Work sessions
        session_count: u32,
        /// What the completion action did
        outcome: CompletionOutcome,
    },
    /// Session switched manually
    SessionSwitched {
        /// New session
        session: SessionType,
    },
    /// Mode changed
    ModeChanged {
        /// New mode
        mode: TimerMode,
    },
    /// Timer reset
    Reset,
    /// Completion message hidden
    MessageDismissed,
}

// ============================================================================
// TickSubscription
// ============================================================================

/// Tracks the single one-second tick subscription.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickSubscription {
    active: Option<u64>,
    next_id: u64,
}

impl TickSubscription {
    /// Opens a subscription, keeping the current one if already active.
    pub fn start(&mut self) -> u64 {
        if let Some(id) = self.active {
            return id;
        }
        self.next_id += 1;
        self.active = Some(self.next_id);
        self.next_id
    }

    /// Cancels the subscription, returning its id if one was active.
    pub fn cancel(&mut self) -> Option<u64> {
        self.active.take()
    }

    #[must_use]
    pub fn active(&self) -> Option<u64> {
        self.active
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that manages timer state, completion and events.
///
/// Operations never fail. Anything that goes wrong inside a completion
/// action is absorbed by the dispatcher.
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
    message: CompletionMessage,
    subscription: TickSubscription,
    dispatcher: CompletionDispatcher,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a paused engine at the start of a Work session.
    pub fn new(
        config: TimerConfig,
        dispatcher: CompletionDispatcher,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
            message: CompletionMessage::default(),
            subscription: TickSubscription::default(),
            dispatcher,
            event_tx,
        }
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No event receiver, dropping timer event");
        }
    }

    /// Starts or pauses the timer.
    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.state.is_running = false;
            self.subscription.cancel();
            info!("Timer paused");
            self.emit(TimerEvent::Paused);
        } else {
            self.state.is_running = true;
            let id = self.subscription.start();
            info!(mode = self.state.mode.as_str(), subscription = id, "Timer started");
            self.emit(TimerEvent::Started {
                mode: self.state.mode,
            });
        }
    }

    /// Applies one second of elapsed time.
    ///
    /// Ignored while paused so a late tick cannot change state. The tick
    /// that brings a countdown to zero also completes the session, so a
    /// running countdown never shows 00:00.
    pub fn tick(&mut self) {
        if !self.state.is_running {
            debug!("Tick while paused, ignoring");
            return;
        }

        match self.state.mode {
            TimerMode::Pomodoro => {
                if self.state.pomodoro_remaining_seconds > 0 {
                    self.state.pomodoro_remaining_seconds -= 1;
                    self.emit(TimerEvent::Tick {
                        remaining_seconds: self.state.pomodoro_remaining_seconds,
                    });
                }
                if self.state.pomodoro_remaining_seconds == 0 {
                    self.complete_session();
                }
            }
            TimerMode::Stopwatch => {
                self.state.stopwatch_elapsed_seconds =
                    self.state.stopwatch_elapsed_seconds.saturating_add(1);
                self.emit(TimerEvent::StopwatchTick {
                    elapsed_seconds: self.state.stopwatch_elapsed_seconds,
                });
            }
            TimerMode::Clock => {}
        }
    }

    /// Runs when the countdown reaches zero.
    fn complete_session(&mut self) {
        self.state.is_running = false;
        self.subscription.cancel();

        let outcome =
            self.dispatcher
                .execute(&self.config.completion, &mut self.message, Instant::now());

        let finished = self.state.current_session;
        let next = self.state.advance_session();
        self.state.pomodoro_remaining_seconds = self.config.duration_seconds(next);

        info!(
            finished = finished.as_str(),
            next = next.as_str(),
            session_count = self.state.session_count,
            "Session completed"
        );
        self.emit(TimerEvent::SessionCompleted {
            finished,
            next,
            session_count: self.state.session_count,
            outcome,
        });
    }

    /// Stops the timer and restores the active mode's starting value.
    ///
    /// Also hides any completion message. Calling it twice has the same
    /// effect as calling it once.
    pub fn reset(&mut self) {
        self.state.is_running = false;
        self.subscription.cancel();
        self.message.dismiss();

        match self.state.mode {
            TimerMode::Pomodoro => {
                self.state.pomodoro_remaining_seconds =
                    self.config.duration_seconds(self.state.current_session);
            }
            TimerMode::Stopwatch => self.state.stopwatch_elapsed_seconds = 0,
            TimerMode::Clock => {}
        }

        debug!(mode = self.state.mode.as_str(), "Timer reset");
        self.emit(TimerEvent::Reset);
    }

    /// Loads `session` with its full configured duration.
    ///
    /// Does not start or stop the timer.
    pub fn switch_session(&mut self, session: SessionType) {
        self.state.current_session = session;
        self.state.pomodoro_remaining_seconds = self.config.duration_seconds(session);
        debug!(session = session.as_str(), "Session switched");
        self.emit(TimerEvent::SessionSwitched { session });
    }

    /// Changes the active mode. Both counters are kept.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.state.mode = mode;
        debug!(mode = mode.as_str(), "Mode changed");
        self.emit(TimerEvent::ModeChanged { mode });
    }

    /// Replaces the Pomodoro countdown with a manually entered time.
    pub fn set_remaining(&mut self, minutes: u32, seconds: u32) {
        self.state.pomodoro_remaining_seconds =
            minutes.saturating_mul(60).saturating_add(seconds);
        debug!(
            remaining = self.state.pomodoro_remaining_seconds,
            "Remaining time set"
        );
    }

    /// Loads a Work countdown of `minutes`, ignoring the configured length.
    pub fn quick_focus(&mut self, minutes: u32) {
        self.state.mode = TimerMode::Pomodoro;
        self.state.current_session = SessionType::Work;
        self.state.pomodoro_remaining_seconds = minutes.saturating_mul(60);
        info!(minutes, "Quick focus");
        self.emit(TimerEvent::ModeChanged {
            mode: TimerMode::Pomodoro,
        });
    }

    /// Renames a session.
    pub fn set_session_label(&mut self, session: SessionType, label: impl Into<String>) {
        self.config.labels.set(session, label);
    }

    /// Label of the current session.
    #[must_use]
    pub fn session_label(&self) -> &str {
        self.config.labels.get(self.state.current_session)
    }

    /// Replaces the settings.
    ///
    /// New durations apply at the next session switch, completion or reset.
    pub fn update_config(&mut self, config: TimerConfig) {
        self.config = config;
        debug!("Configuration updated");
    }

    /// Runs the configured completion action without touching the session.
    pub fn test_completion(&mut self) -> CompletionOutcome {
        self.dispatcher
            .execute(&self.config.completion, &mut self.message, Instant::now())
    }

    /// Hides the completion message immediately.
    pub fn dismiss_message(&mut self) {
        if self.message.is_visible() {
            self.message.dismiss();
            self.emit(TimerEvent::MessageDismissed);
        }
    }

    /// Hides the completion message if its deadline has passed.
    pub fn expire_message(&mut self, now: Instant) {
        if self.message.expire(now) {
            debug!("Completion message expired");
            self.emit(TimerEvent::MessageDismissed);
        }
    }

    /// Pending auto-dismiss time of the completion message.
    #[must_use]
    pub fn message_deadline(&self) -> Option<Instant> {
        self.message.deadline()
    }

    /// Id of the active tick subscription, if the timer needs ticks.
    #[must_use]
    pub fn tick_subscription(&self) -> Option<u64> {
        self.subscription.active()
    }

    /// Time text for the active mode.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.state.formatted_time(&Local::now())
    }

    /// Today's date for the clock view.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        format_date(&Local::now())
    }

    /// Configured gradient preset, clamped to the default when out of range.
    #[must_use]
    pub fn selected_gradient(&self) -> GradientPreset {
        preset_at(self.config.appearance.selected_gradient_index)
    }

    /// Background for the selected preset.
    #[must_use]
    pub fn background(&self, loader: &dyn ImageLoader) -> Background {
        resolve_background(
            &self.selected_gradient(),
            &self.config.appearance.custom_image_path,
            loader,
        )
    }

    /// Builds the snapshot published to observers.
    #[must_use]
    pub fn snapshot(&self, display_mode: DisplayMode) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.state.mode,
            current_session: self.state.current_session,
            session_count: self.state.session_count,
            pomodoro_remaining_seconds: self.state.pomodoro_remaining_seconds,
            stopwatch_elapsed_seconds: self.state.stopwatch_elapsed_seconds,
            is_running: self.state.is_running,
            formatted_time: self.formatted_time(),
            session_label: self.session_label().to_string(),
            is_showing_completion_message: self.message.is_visible(),
            completion_message_text: self.message.text().to_string(),
            display_mode,
        }
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a reference to the current settings.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the completion message state.
    pub fn message(&self) -> &CompletionMessage {
        &self.message
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
