//! Core data types for LazyTimer.
//!
//! This module defines the data structures used for:
//! - Timer modes, Pomodoro sessions and completion actions
//! - In-memory settings with validation
//! - Read-only snapshots published to view surfaces

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerMode
// ============================================================================

/// Selects which counting semantics are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Work/break countdown cycles
    #[default]
    Pomodoro,
    /// Unbounded count-up
    Stopwatch,
    /// Wall clock display
    Clock,
}

impl TimerMode {
    /// All modes in menu order.
    pub const ALL: [TimerMode; 3] = [TimerMode::Pomodoro, TimerMode::Stopwatch, TimerMode::Clock];

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "pomodoro",
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::Clock => "clock",
        }
    }

    /// Returns the human-readable name shown in menus.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::Stopwatch => "Stopwatch",
            TimerMode::Clock => "Clock",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pomodoro" => Ok(TimerMode::Pomodoro),
            "stopwatch" => Ok(TimerMode::Stopwatch),
            "clock" => Ok(TimerMode::Clock),
            other => Err(format!("unknown timer mode '{other}' (pomodoro, stopwatch, clock)")),
        }
    }
}

// ============================================================================
// SessionType
// ============================================================================

/// A Pomodoro session. Only meaningful in [`TimerMode::Pomodoro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Focused work
    #[default]
    Work,
    /// Break after a work session
    ShortBreak,
    /// Break after every fourth work session
    LongBreak,
}

impl SessionType {
    /// All sessions in button order.
    pub const ALL: [SessionType; 3] = [
        SessionType::Work,
        SessionType::ShortBreak,
        SessionType::LongBreak,
    ];

    /// Returns the string representation of the session.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Work => "work",
            SessionType::ShortBreak => "short_break",
            SessionType::LongBreak => "long_break",
        }
    }

    /// Returns the session button title.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Work => "Work",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }

    /// Returns true for either kind of break.
    pub fn is_break(&self) -> bool {
        matches!(self, SessionType::ShortBreak | SessionType::LongBreak)
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "work" => Ok(SessionType::Work),
            "short" | "short_break" => Ok(SessionType::ShortBreak),
            "long" | "long_break" => Ok(SessionType::LongBreak),
            other => Err(format!("unknown session '{other}' (work, short, long)")),
        }
    }
}

// ============================================================================
// DisplayMode
// ============================================================================

/// The presentation surface currently showing the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Standard application window
    #[default]
    Window,
    /// Full-screen click-through overlay
    Overlay,
    /// Small always-on-top widget
    Floating,
}

impl DisplayMode {
    /// All display modes in menu order.
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Window,
        DisplayMode::Floating,
        DisplayMode::Overlay,
    ];

    /// Returns the string representation of the display mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Window => "window",
            DisplayMode::Overlay => "overlay",
            DisplayMode::Floating => "floating",
        }
    }

    /// Returns the menu title for the display mode.
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Window => "Standard Window",
            DisplayMode::Overlay => "Full Overlay",
            DisplayMode::Floating => "Floating Timer",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "window" => Ok(DisplayMode::Window),
            "overlay" => Ok(DisplayMode::Overlay),
            "floating" => Ok(DisplayMode::Floating),
            other => Err(format!("unknown display mode '{other}' (window, overlay, floating)")),
        }
    }
}

// ============================================================================
// TimerPosition
// ============================================================================

/// Placement of the timer text on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPosition {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl TimerPosition {
    /// Returns the settings title for the position.
    pub fn label(&self) -> &'static str {
        match self {
            TimerPosition::Center => "Center",
            TimerPosition::TopLeft => "Top Left",
            TimerPosition::TopRight => "Top Right",
            TimerPosition::BottomLeft => "Bottom Left",
            TimerPosition::BottomRight => "Bottom Right",
        }
    }
}

// ============================================================================
// CompletionAction
// ============================================================================

/// Side effect fired when a Pomodoro countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionAction {
    /// System alert sound
    #[default]
    Beep,
    /// Read the completion text aloud
    SpeakText,
    /// Show the completion text over the timer for a few seconds
    ShowMessage,
    /// Play a user-selected sound file
    PlaySound,
}

impl CompletionAction {
    /// Returns the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionAction::Beep => "beep",
            CompletionAction::SpeakText => "speak_text",
            CompletionAction::ShowMessage => "show_message",
            CompletionAction::PlaySound => "play_sound",
        }
    }

    /// Returns the settings title for the action.
    pub fn label(&self) -> &'static str {
        match self {
            CompletionAction::Beep => "System Beep",
            CompletionAction::SpeakText => "Speak Text",
            CompletionAction::ShowMessage => "Show Message Overlay",
            CompletionAction::PlaySound => "Play Sound File",
        }
    }
}

impl FromStr for CompletionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "beep" => Ok(CompletionAction::Beep),
            "speak" | "speak_text" => Ok(CompletionAction::SpeakText),
            "message" | "show_message" => Ok(CompletionAction::ShowMessage),
            "sound" | "play_sound" => Ok(CompletionAction::PlaySound),
            other => Err(format!(
                "unknown completion action '{other}' (beep, speak, message, sound)"
            )),
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Custom titles shown next to the session counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLabels {
    pub work: String,
    pub short_break: String,
    pub long_break: String,
}

impl Default for SessionLabels {
    fn default() -> Self {
        Self {
            work: "🎯 Focus Time".to_string(),
            short_break: "☕ Short Break".to_string(),
            long_break: "🌴 Long Break".to_string(),
        }
    }
}

impl SessionLabels {
    /// Returns the label for the given session.
    pub fn get(&self, session: SessionType) -> &str {
        match session {
            SessionType::Work => &self.work,
            SessionType::ShortBreak => &self.short_break,
            SessionType::LongBreak => &self.long_break,
        }
    }

    /// Replaces the label for the given session.
    pub fn set(&mut self, session: SessionType, label: impl Into<String>) {
        let slot = match session {
            SessionType::Work => &mut self.work,
            SessionType::ShortBreak => &mut self.short_break,
            SessionType::LongBreak => &mut self.long_break,
        };
        *slot = label.into();
    }
}

/// What happens when a countdown completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Configured side effect
    pub action: CompletionAction,
    /// Text spoken or shown
    pub text: String,
    /// Sound file for [`CompletionAction::PlaySound`]; empty means unset
    pub sound_path: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            action: CompletionAction::Beep,
            text: "Time is up! Take a break.".to_string(),
            sound_path: String::new(),
        }
    }
}

/// Subtitle text rendered under the overlay timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleConfig {
    pub text: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub font_name: String,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 24.0,
            bold: false,
            italic: false,
            font_name: "System".to_string(),
        }
    }
}

/// Overlay presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Opacity of the whole overlay (0.1-1.0)
    pub opacity: f64,
    pub position: TimerPosition,
    pub subtitle: SubtitleConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: 0.85,
            position: TimerPosition::Center,
            subtitle: SubtitleConfig::default(),
        }
    }
}

/// Background selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Index into the gradient presets; out-of-range values resolve to the default
    pub selected_gradient_index: i64,
    /// Image used by the "Custom Image" preset; empty means unset
    pub custom_image_path: String,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            selected_gradient_index: crate::appearance::DEFAULT_PRESET_INDEX as i64,
            custom_image_path: String::new(),
        }
    }
}

/// In-memory settings for the timer. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work duration in minutes (1-60)
    pub work_minutes: u32,
    /// Short break duration in minutes (1-30)
    pub short_break_minutes: u32,
    /// Long break duration in minutes (1-60)
    pub long_break_minutes: u32,
    pub labels: SessionLabels,
    pub completion: CompletionConfig,
    pub overlay: OverlayConfig,
    pub appearance: AppearanceConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            labels: SessionLabels::default(),
            completion: CompletionConfig::default(),
            overlay: OverlayConfig::default(),
            appearance: AppearanceConfig::default(),
        }
    }
}

impl TimerConfig {
    /// Sets the work duration.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    /// Sets the short break duration.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    /// Sets the long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Sets the completion action.
    pub fn with_completion_action(mut self, action: CompletionAction) -> Self {
        self.completion.action = action;
        self
    }

    /// Sets the completion text.
    pub fn with_completion_text(mut self, text: impl Into<String>) -> Self {
        self.completion.text = text.into();
        self
    }

    /// Returns the configured duration of a session in minutes.
    pub fn duration_minutes(&self, session: SessionType) -> u32 {
        match session {
            SessionType::Work => self.work_minutes,
            SessionType::ShortBreak => self.short_break_minutes,
            SessionType::LongBreak => self.long_break_minutes,
        }
    }

    /// Returns the configured duration of a session in seconds.
    pub fn duration_seconds(&self, session: SessionType) -> u32 {
        self.duration_minutes(session) * 60
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=60).contains(&self.work_minutes) {
            return Err("work duration must be between 1 and 60 minutes".to_string());
        }
        if !(1..=30).contains(&self.short_break_minutes) {
            return Err("short break duration must be between 1 and 30 minutes".to_string());
        }
        if !(1..=60).contains(&self.long_break_minutes) {
            return Err("long break duration must be between 1 and 60 minutes".to_string());
        }
        if !(0.1..=1.0).contains(&self.overlay.opacity) {
            return Err("overlay opacity must be between 0.1 and 1.0".to_string());
        }
        if !(12.0..=72.0).contains(&self.overlay.subtitle.font_size) {
            return Err("subtitle font size must be between 12 and 72".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer published to every surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub current_session: SessionType,
    pub session_count: u32,
    pub pomodoro_remaining_seconds: u32,
    pub stopwatch_elapsed_seconds: u64,
    pub is_running: bool,
    /// Time text for the active mode
    pub formatted_time: String,
    /// Custom label of the current session
    pub session_label: String,
    pub is_showing_completion_message: bool,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub completion_message_text: String,
    pub display_mode: DisplayMode,
}

// ============================================================================
// Tests
// ============================================================================
