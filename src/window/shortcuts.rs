//! Keyboard shortcuts for switching display modes.
//!
//! | Shortcut | Display mode |
//! |----------|--------------|
//! | ⌘⇧O      | Overlay      |
//! | ⌘⇧F      | Floating     |
//! | ⌘⇧W      | Window       |

use std::fmt;
use std::str::FromStr;

use crate::types::DisplayMode;

/// Modifier keys held with a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub command: bool,
    pub shift: bool,
    pub option: bool,
    pub control: bool,
}

impl Modifiers {
    /// ⌘⇧
    pub const COMMAND_SHIFT: Modifiers = Modifiers {
        command: true,
        shift: true,
        option: false,
        control: false,
    };
}

/// A key with its modifiers. Keys are stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: char,
    pub modifiers: Modifiers,
}

impl Shortcut {
    #[must_use]
    pub const fn command_shift(key: char) -> Self {
        Self {
            key,
            modifiers: Modifiers::COMMAND_SHIFT,
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.command {
            write!(f, "⌘")?;
        }
        if self.modifiers.shift {
            write!(f, "⇧")?;
        }
        if self.modifiers.option {
            write!(f, "⌥")?;
        }
        if self.modifiers.control {
            write!(f, "⌃")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

impl FromStr for Shortcut {
    type Err = String;

    /// Parses `cmd+shift+o` style text or the symbol form `⌘⇧O`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::default();
        let mut key = None;

        let text = s.trim();
        let parts: Vec<String> = if text.contains('+') {
            text.split('+').map(|p| p.trim().to_lowercase()).collect()
        } else {
            text.chars().map(|c| c.to_lowercase().collect()).collect()
        };

        for part in parts {
            match part.as_str() {
                "cmd" | "command" | "⌘" => modifiers.command = true,
                "shift" | "⇧" => modifiers.shift = true,
                "opt" | "option" | "alt" | "⌥" => modifiers.option = true,
                "ctrl" | "control" | "⌃" => modifiers.control = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(format!("invalid shortcut '{s}'")),
                    }
                }
            }
        }

        key.map(|key| Shortcut { key, modifiers })
            .ok_or_else(|| format!("shortcut '{s}' has no key"))
    }
}

/// Shortcut bindings for display modes.
pub const DISPLAY_SHORTCUTS: [(Shortcut, DisplayMode); 3] = [
    (Shortcut::command_shift('o'), DisplayMode::Overlay),
    (Shortcut::command_shift('f'), DisplayMode::Floating),
    (Shortcut::command_shift('w'), DisplayMode::Window),
];

/// Display mode bound to `shortcut`, if any.
#[must_use]
pub fn display_mode_for(shortcut: &Shortcut) -> Option<DisplayMode> {
    DISPLAY_SHORTCUTS
        .iter()
        .find(|(bound, _)| bound == shortcut)
        .map(|(_, mode)| *mode)
}

/// Shortcut that switches to `mode`.
#[must_use]
pub fn shortcut_for(mode: DisplayMode) -> Shortcut {
    DISPLAY_SHORTCUTS
        .iter()
        .find(|(_, bound)| *bound == mode)
        .map(|(shortcut, _)| *shortcut)
        .unwrap_or(Shortcut::command_shift('w'))
}
