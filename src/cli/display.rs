//! Display utilities for the LazyTimer CLI.
//!
//! This module provides formatted output for:
//! - Timer snapshots (text or JSON lines)
//! - Gradient presets and system sounds
//! - The menu bar status item
//! - Completion outcomes and errors

use crate::appearance::{GradientPreset, DEFAULT_PRESET_INDEX};
use crate::completion::CompletionOutcome;
use crate::menubar::{MenuBar, MenuConfig};
use crate::sound::SoundSource;
use crate::types::{TimerMode, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats a snapshot as one status line.
    pub fn format_snapshot(snapshot: &TimerSnapshot) -> String {
        let state = if snapshot.is_running {
            "running"
        } else {
            "paused"
        };

        let mut line = match snapshot.mode {
            TimerMode::Pomodoro => format!(
                "{} | {} | {} | {} | sessions: {}",
                snapshot.mode.label(),
                snapshot.session_label,
                snapshot.formatted_time,
                state,
                snapshot.session_count
            ),
            TimerMode::Stopwatch => format!(
                "{} | {} | {}",
                snapshot.mode.label(),
                snapshot.formatted_time,
                state
            ),
            TimerMode::Clock => format!("{} | {}", snapshot.mode.label(), snapshot.formatted_time),
        };

        line.push_str(&format!(" | {}", snapshot.display_mode.label()));

        if snapshot.is_showing_completion_message {
            line.push_str(&format!(" | {}", snapshot.completion_message_text));
        }
        line
    }

    /// Formats a snapshot as a JSON line.
    pub fn format_snapshot_json(snapshot: &TimerSnapshot) -> serde_json::Result<String> {
        serde_json::to_string(snapshot)
    }

    /// Formats the preset list, marking the default preset.
    pub fn format_presets(presets: &[GradientPreset]) -> Vec<String> {
        presets
            .iter()
            .enumerate()
            .map(|(index, preset)| {
                let marker = if index == DEFAULT_PRESET_INDEX { "*" } else { " " };
                let colors: Vec<String> = preset.colors.iter().map(ToString::to_string).collect();
                format!(
                    "{} {:>2}  {:<16} {:<7} {}",
                    marker,
                    index,
                    preset.name,
                    preset.kind.as_str(),
                    colors.join(" ")
                )
                .trim_end()
                .to_string()
            })
            .collect()
    }

    /// Formats the discovered system sounds.
    pub fn format_sounds(sounds: &[SoundSource]) -> Vec<String> {
        if sounds.is_empty() {
            return vec!["No system sounds found".to_string()];
        }
        sounds
            .iter()
            .map(|sound| match sound.path() {
                Some(path) => format!("{:<12} {}", sound.name(), path.display()),
                None => sound.name(),
            })
            .collect()
    }

    /// Formats the menu model, one item per line.
    pub fn format_menu(menu: &MenuConfig) -> Vec<String> {
        menu.items()
            .into_iter()
            .map(|item| {
                let check = if item.checked { "✓" } else { " " };
                let text = if item.enabled {
                    item.text.clone()
                } else {
                    format!("({})", item.text)
                };
                format!("{} {}", check, text)
            })
            .collect()
    }

    /// Describes a completion outcome.
    pub fn format_outcome(outcome: &CompletionOutcome) -> &'static str {
        match outcome {
            CompletionOutcome::Beeped => "Played the alert sound",
            CompletionOutcome::Spoke => "Speaking the completion text",
            CompletionOutcome::SpeechFailed => "Speech could not start",
            CompletionOutcome::MessageShown => "Showing the completion message",
            CompletionOutcome::SoundPlayed => "Playing the sound file",
            CompletionOutcome::FellBackToBeep => "Sound file unavailable, played the alert sound",
            CompletionOutcome::Muted => "Sound is disabled, nothing played",
        }
    }

    /// Formats the menu bar status item, e.g. `24:59 (timer)`.
    pub fn format_status_item(menubar: &MenuBar) -> String {
        format!("{} ({})", menubar.title(), menubar.icon_name())
    }

    /// Prints a status line to stdout.
    pub fn show_snapshot(snapshot: &TimerSnapshot, json: bool) {
        if json {
            match Self::format_snapshot_json(snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => Self::show_error(&e.to_string()),
            }
        } else {
            println!("{}", Self::format_snapshot(snapshot));
        }
    }

    /// Prints lines to stdout.
    pub fn show_lines(lines: &[String]) {
        for line in lines {
            println!("{}", line);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
