//! Menu bar summary.
//!
//! This module provides:
//! - Title and icon for the menu bar item (e.g., "15:30" with a timer icon)
//! - The dropdown menu model with controls and mode selectors
//! - Translation of menu clicks into application commands
//!
//! # Architecture
//!
//! - `icon.rs`: Title and icon generation
//! - `menu.rs`: Menu model
//! - `event.rs`: Menu item ids and actions
//! - `mod.rs`: [`MenuBar`], which keeps the latest snapshot and ties the
//!   three together
//!
//! Everything here is platform-independent; a front-end renders the model.

pub mod event;
pub mod icon;
pub mod menu;

pub use event::{EventHandler, MenuAction, MenuItemId};
pub use icon::IconManager;
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};

use crate::engine::AppCommand;
use crate::types::TimerSnapshot;

// ============================================================================
// MenuBar
// ============================================================================

/// Menu bar state derived from the latest snapshot.
#[derive(Debug)]
pub struct MenuBar {
    icon_manager: IconManager,
    menu_builder: MenuBuilder,
    event_handler: EventHandler,
    snapshot: TimerSnapshot,
}

impl MenuBar {
    /// Creates a menu bar showing `snapshot`.
    pub fn new(snapshot: TimerSnapshot) -> Self {
        Self {
            icon_manager: IconManager::new(),
            menu_builder: MenuBuilder::new(),
            event_handler: EventHandler::new(),
            snapshot,
        }
    }

    /// Replaces the snapshot.
    ///
    /// Returns `true` if the title or the icon changed and the status item
    /// needs redrawing.
    pub fn update(&mut self, snapshot: TimerSnapshot) -> bool {
        let icon_changed = self.icon_manager.icon_changed(&snapshot);
        if icon_changed {
            tracing::debug!(icon = self.icon_manager.icon_name(&snapshot), "Menu bar icon changed");
        }
        let title_changed = self.icon_manager.generate_title(&snapshot) != self.title();
        self.snapshot = snapshot;
        icon_changed || title_changed
    }

    /// Title text for the menu bar.
    pub fn title(&self) -> String {
        self.icon_manager.generate_title(&self.snapshot)
    }

    /// Icon symbol name for the menu bar.
    pub fn icon_name(&self) -> &'static str {
        self.icon_manager.icon_name(&self.snapshot)
    }

    /// Current menu model.
    pub fn menu(&self) -> MenuConfig {
        self.menu_builder.build(&self.snapshot)
    }

    /// Translates a click into the command to send, if any.
    pub fn click(&self, item_id: MenuItemId) -> Option<AppCommand> {
        self.event_handler
            .handle_click(item_id)
            .map(MenuAction::to_command)
    }

    /// The snapshot being shown.
    pub fn snapshot(&self) -> &TimerSnapshot {
        &self.snapshot
    }
}

// ============================================================================
// Tests
// ============================================================================
