//! Title and icon for the menu bar item.
//!
//! While the timer runs the menu bar shows the live time; otherwise it shows
//! a fixed label.

use crate::types::TimerSnapshot;

// ============================================================================
// Constants
// ============================================================================

/// Title shown while the timer is idle
pub const IDLE_TITLE: &str = "Timer";

/// SF Symbol shown while running
pub const RUNNING_ICON: &str = "timer";

/// SF Symbol shown while idle
pub const IDLE_ICON: &str = "timer.circle";

// ============================================================================
// IconManager
// ============================================================================

/// Generates the menu bar title and icon from snapshots.
#[derive(Debug, Default)]
pub struct IconManager {
    /// Running flag at the last icon update
    last_running: Option<bool>,
}

impl IconManager {
    /// Creates a new IconManager.
    pub fn new() -> Self {
        Self { last_running: None }
    }

    /// Generates the title text for the menu bar.
    pub fn generate_title(&self, snapshot: &TimerSnapshot) -> String {
        if snapshot.is_running {
            snapshot.formatted_time.clone()
        } else {
            IDLE_TITLE.to_string()
        }
    }

    /// Returns the icon symbol name for the snapshot.
    pub fn icon_name(&self, snapshot: &TimerSnapshot) -> &'static str {
        if snapshot.is_running {
            RUNNING_ICON
        } else {
            IDLE_ICON
        }
    }

    /// Checks if the icon needs to change since the last update.
    pub fn icon_changed(&mut self, snapshot: &TimerSnapshot) -> bool {
        let changed = self.last_running != Some(snapshot.is_running);
        if changed {
            self.last_running = Some(snapshot.is_running);
        }
        changed
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DisplayMode, SessionType, TimerMode};

    fn snapshot(is_running: bool) -> TimerSnapshot {
        TimerSnapshot {
            mode: TimerMode::Pomodoro,
            current_session: SessionType::Work,
            session_count: 0,
            pomodoro_remaining_seconds: 930,
            stopwatch_elapsed_seconds: 0,
            is_running,
            formatted_time: "15:30".to_string(),
            session_label: "🎯 Focus Time".to_string(),
            is_showing_completion_message: false,
            completion_message_text: String::new(),
            display_mode: DisplayMode::Window,
        }
    }

    #[test]
    fn test_title_while_running() {
        let manager = IconManager::new();
        assert_eq!(manager.generate_title(&snapshot(true)), "15:30");
        assert_eq!(manager.icon_name(&snapshot(true)), "timer");
    }

    #[test]
    fn test_title_while_idle() {
        let manager = IconManager::new();
        assert_eq!(manager.generate_title(&snapshot(false)), "Timer");
        assert_eq!(manager.icon_name(&snapshot(false)), "timer.circle");
    }

    #[test]
    fn test_icon_changed() {
        let mut manager = IconManager::new();
        assert!(manager.icon_changed(&snapshot(false)));
        assert!(!manager.icon_changed(&snapshot(false)));
        assert!(manager.icon_changed(&snapshot(true)));
        assert!(!manager.icon_changed(&snapshot(true)));
    }
}
