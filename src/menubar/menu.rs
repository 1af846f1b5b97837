//! Menu model for the menu bar dropdown.
//!
//! The model is rebuilt from each snapshot: header, live time, controls,
//! mode selector, display selector and quit.

use super::event::MenuItemId;
use crate::types::{DisplayMode, TimerMode, TimerSnapshot};

/// Application name shown in the header.
pub const APP_NAME: &str = "LazyTimer";

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    pub id: MenuItemId,
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is clickable
    pub enabled: bool,
    /// Whether the item shows a checkmark
    pub checked: bool,
}

impl MenuItemConfig {
    /// Creates a new menu item configuration.
    pub fn new(id: MenuItemId, text: impl Into<String>, enabled: bool) -> Self {
        Self {
            id,
            text: text.into(),
            enabled,
            checked: false,
        }
    }

    fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete menu configuration for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub header: MenuItemConfig,
    pub time: MenuItemConfig,
    pub toggle: MenuItemConfig,
    pub reset: MenuItemConfig,
    pub modes: Vec<MenuItemConfig>,
    pub displays: Vec<MenuItemConfig>,
    pub quit: MenuItemConfig,
}

impl MenuConfig {
    /// All items in menu order.
    pub fn items(&self) -> Vec<&MenuItemConfig> {
        let mut items = vec![&self.header, &self.time, &self.toggle, &self.reset];
        items.extend(self.modes.iter());
        items.extend(self.displays.iter());
        items.push(&self.quit);
        items
    }
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds menu configuration from snapshots.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    /// Creates a new MenuBuilder.
    pub fn new() -> Self {
        Self
    }

    /// Builds the menu for `snapshot`.
    pub fn build(&self, snapshot: &TimerSnapshot) -> MenuConfig {
        MenuConfig {
            header: MenuItemConfig::new(
                MenuItemId::Header,
                format!("{} ({})", APP_NAME, snapshot.mode.label()),
                false,
            ),
            time: MenuItemConfig::new(MenuItemId::Time, snapshot.formatted_time.clone(), false),
            toggle: MenuItemConfig::new(
                MenuItemId::Toggle,
                if snapshot.is_running { "Pause" } else { "Start" },
                true,
            ),
            reset: MenuItemConfig::new(MenuItemId::Reset, "Reset", true),
            modes: self.build_mode_items(snapshot.mode),
            displays: self.build_display_items(snapshot.display_mode),
            quit: MenuItemConfig::new(MenuItemId::Quit, format!("Quit {}", APP_NAME), true),
        }
    }

    fn build_mode_items(&self, current: TimerMode) -> Vec<MenuItemConfig> {
        TimerMode::ALL
            .iter()
            .map(|mode| {
                MenuItemConfig::new(MenuItemId::Mode(*mode), mode.label(), true)
                    .checked(*mode == current)
            })
            .collect()
    }

    fn build_display_items(&self, active: DisplayMode) -> Vec<MenuItemConfig> {
        DisplayMode::ALL
            .iter()
            .map(|display| {
                MenuItemConfig::new(MenuItemId::Display(*display), display.label(), true)
                    .checked(*display == active)
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
