//! Command definitions for the LazyTimer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::appearance::DEFAULT_PRESET_INDEX;
use crate::sound::find_system_sound;
use crate::types::{CompletionAction, CompletionConfig, DisplayMode, TimerConfig, TimerMode};

// ============================================================================
// CLI Structure
// ============================================================================

/// LazyTimer - Pomodoro, stopwatch and clock in one timer
#[derive(Parser, Debug)]
#[command(
    name = "lazytimer",
    version,
    about = "Pomodoro, stopwatch and clock timer",
    long_about = "A timer with Pomodoro, stopwatch and clock modes.\n\
                  The timer can be presented as a window, a full-screen overlay or a small floating widget.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer in the terminal, reading commands from stdin
    Run(RunArgs),

    /// List background gradient presets
    Presets,

    /// List system sounds available for alerts
    Sounds,

    /// Fire the completion action once
    TestAction(ActionArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Completion Action Arguments
// ============================================================================

/// Arguments selecting the completion action
#[derive(Args, Debug, Clone)]
pub struct ActionArgs {
    /// Completion action (beep, speak, message, sound)
    #[arg(short, long, default_value = "beep")]
    pub action: CompletionAction,

    /// Text spoken or shown on completion
    #[arg(short, long, value_parser = validate_text)]
    pub text: Option<String>,

    /// Sound file played by the `sound` action, or a system sound name
    #[arg(long)]
    pub sound: Option<PathBuf>,
}

impl Default for ActionArgs {
    fn default() -> Self {
        Self {
            action: CompletionAction::Beep,
            text: None,
            sound: None,
        }
    }
}

impl ActionArgs {
    /// Builds the completion settings, keeping defaults for omitted flags.
    pub fn to_completion(&self) -> CompletionConfig {
        let mut completion = CompletionConfig {
            action: self.action,
            ..CompletionConfig::default()
        };
        if let Some(text) = &self.text {
            completion.text = text.clone();
        }
        if let Some(sound) = &self.sound {
            completion.sound_path = resolve_sound(sound);
        }
        completion
    }
}

/// Maps a bare name like `Glass` to the system sound file of that name.
fn resolve_sound(sound: &Path) -> String {
    let is_bare_name = sound.components().count() == 1 && sound.extension().is_none();
    if is_bare_name {
        if let Ok(source) = find_system_sound(&sound.to_string_lossy()) {
            if let Some(path) = source.path() {
                return path.to_string_lossy().into_owned();
            }
        }
    }
    sound.to_string_lossy().into_owned()
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Timer mode (pomodoro, stopwatch, clock)
    #[arg(short, long, default_value = "pomodoro")]
    pub mode: TimerMode,

    /// Work duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub work: u32,

    /// Short break duration in minutes (1-30)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: u32,

    #[command(flatten)]
    pub completion: ActionArgs,

    /// Background gradient preset index (see `presets`)
    #[arg(short, long, allow_negative_numbers = true, default_value_t = DEFAULT_PRESET_INDEX as i64)]
    pub gradient: i64,

    /// Custom background image for the overlay
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Initial display mode (window, overlay, floating)
    #[arg(short, long, default_value = "window")]
    pub display: DisplayMode,

    /// Start the timer immediately
    #[arg(long)]
    pub start: bool,

    /// Disable audio output
    #[arg(long)]
    pub no_sound: bool,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            mode: TimerMode::Pomodoro,
            work: 25,
            short_break: 5,
            long_break: 15,
            completion: ActionArgs::default(),
            gradient: DEFAULT_PRESET_INDEX as i64,
            image: None,
            display: DisplayMode::Window,
            start: false,
            no_sound: false,
            json: false,
        }
    }
}

impl RunArgs {
    /// Builds the timer settings from the flags.
    pub fn to_config(&self) -> TimerConfig {
        let mut config = TimerConfig::default()
            .with_work_minutes(self.work)
            .with_short_break_minutes(self.short_break)
            .with_long_break_minutes(self.long_break);
        config.completion = self.completion.to_completion();
        config.appearance.selected_gradient_index = self.gradient;
        if let Some(image) = &self.image {
            config.appearance.custom_image_path = image.to_string_lossy().into_owned();
        }
        config
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates completion text.
///
/// - Must not be blank
/// - Must not exceed 200 characters
fn validate_text(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("completion text cannot be empty".to_string());
    }
    if s.chars().count() > 200 {
        return Err("completion text must be 200 characters or fewer".to_string());
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
