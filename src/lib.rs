//! LazyTimer Library
//!
//! This library provides the core functionality for LazyTimer.
//! It includes:
//! - Timer engine for Pomodoro, stopwatch and clock modes
//! - Application actor that serializes commands, ticks and deadlines
//! - Completion actions (beep, speech, message, sound file)
//! - Display-mode coordination for window, overlay and floating surfaces
//! - Background gradient presets
//! - Menu bar model and sound playback
//! - CLI command parsing and the terminal front-end

pub mod appearance;
pub mod cli;
pub mod completion;
pub mod engine;
pub mod menubar;
pub mod sound;
pub mod types;
pub mod window;

// Re-export commonly used types for convenience
pub use types::{
    CompletionAction, CompletionConfig, DisplayMode, OverlayConfig, SessionType, TimerConfig,
    TimerMode, TimerPosition, TimerSnapshot,
};

// Re-export engine types
pub use engine::{App, AppCommand, AppHandle, AppServices, TimerEngine, TimerEvent, TimerState};

// Re-export completion types
pub use completion::{
    AlertService, CompletionDispatcher, CompletionMessage, CompletionOutcome, MockAlert,
    MockSpeech, SpeechService,
};

// Re-export window types
pub use window::{MockSurfaceHost, SurfaceHost, WindowManager};

// Re-export appearance types
pub use appearance::{preset_at, Background, GradientPreset, ImageLoader, MockImageLoader};

// Re-export menubar types
pub use menubar::{MenuAction, MenuBar, MenuItemId};

// Re-export sound types
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
