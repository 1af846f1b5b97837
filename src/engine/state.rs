//! Timer state owned by the engine.

use chrono::{DateTime, Local};

use crate::types::{SessionType, TimerConfig, TimerMode};

/// Number of Work sessions per Pomodoro cycle; every cycle ends in a Long Break.
pub const SESSIONS_PER_CYCLE: u32 = 4;

/// Mutable timer state.
///
/// The Pomodoro countdown and the stopwatch counter are kept side by side so
/// switching modes never loses either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub mode: TimerMode,
    pub current_session: SessionType,
    /// Completed Work sessions
    pub session_count: u32,
    pub pomodoro_remaining_seconds: u32,
    pub stopwatch_elapsed_seconds: u64,
    pub is_running: bool,
}

impl TimerState {
    /// Initial state: paused Pomodoro at the start of a Work session.
    #[must_use]
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            mode: TimerMode::Pomodoro,
            current_session: SessionType::Work,
            session_count: 0,
            pomodoro_remaining_seconds: config.duration_seconds(SessionType::Work),
            stopwatch_elapsed_seconds: 0,
            is_running: false,
        }
    }

    /// Moves to the session that follows the current one and returns it.
    ///
    /// A finished Work session is counted; every fourth one is followed by
    /// a Long Break. Breaks always lead back to Work.
    pub fn advance_session(&mut self) -> SessionType {
        let next = match self.current_session {
            SessionType::Work => {
                self.session_count += 1;
                if self.session_count % SESSIONS_PER_CYCLE == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
        };
        self.current_session = next;
        next
    }

    /// Time text for the active mode.
    ///
    /// Clock mode shows `now` instead of a counter.
    #[must_use]
    pub fn formatted_time(&self, now: &DateTime<Local>) -> String {
        match self.mode {
            TimerMode::Pomodoro => format_seconds(u64::from(self.pomodoro_remaining_seconds)),
            TimerMode::Stopwatch => format_seconds(self.stopwatch_elapsed_seconds),
            TimerMode::Clock => format_clock(now),
        }
    }
}

/// Formats a second count as `MM:SS`, or `H:MM:SS` once it reaches an hour.
#[must_use]
pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Wall-clock time as `HH:MM:SS`.
#[must_use]
pub fn format_clock(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Calendar date as `Weekday, Month D, YYYY`.
#[must_use]
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}
