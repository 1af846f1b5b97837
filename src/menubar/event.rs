//! Event handling for menu bar interactions.
//!
//! This module handles:
//! - Menu event processing
//! - Command dispatching based on menu item clicks
//!
//! Menu items map to [`MenuAction`]s, which become [`AppCommand`]s for the
//! application actor.

use std::fmt;

use crate::engine::AppCommand;
use crate::types::{DisplayMode, TimerMode};

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start or pause the timer
    ToggleTimer,
    /// Reset the active mode
    Reset,
    /// Select a timer mode
    SetMode(TimerMode),
    /// Select a display mode
    SwitchDisplay(DisplayMode),
    /// Quit the application
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::ToggleTimer => write!(f, "toggle"),
            MenuAction::Reset => write!(f, "reset"),
            MenuAction::SetMode(mode) => write!(f, "mode:{}", mode.as_str()),
            MenuAction::SwitchDisplay(display) => write!(f, "display:{}", display.as_str()),
            MenuAction::Quit => write!(f, "quit"),
        }
    }
}

impl MenuAction {
    /// Returns the application command for this action.
    pub fn to_command(self) -> AppCommand {
        match self {
            MenuAction::ToggleTimer => AppCommand::Toggle,
            MenuAction::Reset => AppCommand::Reset,
            MenuAction::SetMode(mode) => AppCommand::SetMode(mode),
            MenuAction::SwitchDisplay(display) => AppCommand::SwitchDisplay(display),
            MenuAction::Quit => AppCommand::Shutdown,
        }
    }

    /// Returns a human-readable description of this action.
    pub fn description(&self) -> &'static str {
        match self {
            MenuAction::ToggleTimer => "Start or pause the timer",
            MenuAction::Reset => "Reset the timer",
            MenuAction::SetMode(_) => "Change timer mode",
            MenuAction::SwitchDisplay(_) => "Change display mode",
            MenuAction::Quit => "Quit LazyTimer",
        }
    }
}

// ============================================================================
// MenuItemId
// ============================================================================

/// Identifiers for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    /// App name and mode header
    Header,
    /// Current time line
    Time,
    /// Start/Pause item
    Toggle,
    /// Reset item
    Reset,
    /// Timer mode selector entry
    Mode(TimerMode),
    /// Display mode selector entry
    Display(DisplayMode),
    /// Quit item
    Quit,
}

impl MenuItemId {
    /// Converts a menu item ID to the corresponding action.
    ///
    /// Returns `None` for informational items like the header.
    pub fn to_action(&self) -> Option<MenuAction> {
        match self {
            MenuItemId::Header | MenuItemId::Time => None,
            MenuItemId::Toggle => Some(MenuAction::ToggleTimer),
            MenuItemId::Reset => Some(MenuAction::Reset),
            MenuItemId::Mode(mode) => Some(MenuAction::SetMode(*mode)),
            MenuItemId::Display(display) => Some(MenuAction::SwitchDisplay(*display)),
            MenuItemId::Quit => Some(MenuAction::Quit),
        }
    }
}

// ============================================================================
// EventHandler
// ============================================================================

/// Handles menu events and converts them to actions.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    /// Creates a new EventHandler.
    pub fn new() -> Self {
        Self
    }

    /// Processes a menu item click and returns the corresponding action.
    pub fn handle_click(&self, item_id: MenuItemId) -> Option<MenuAction> {
        let action = item_id.to_action();

        if let Some(ref action) = action {
            tracing::info!(action = %action, "Menu action received");
        }

        action
    }
}

// ============================================================================
// Tests
// ============================================================================
