//! Display-mode coordination.
//!
//! The timer is presented in exactly one of three ways at a time:
//!
//! - `Window`: the regular main window
//! - `Overlay`: a full-screen, click-through panel above everything
//! - `Floating`: a small movable always-on-top widget
//!
//! [`WindowManager`] owns the active mode and tears down the old surface
//! before standing up the new one. The actual drawing is delegated to a
//! [`SurfaceHost`].

pub mod host;
pub mod panel;
pub mod shortcuts;

pub use host::{
    HostCall, MockSurfaceHost, PanelId, PanelKind, PanelSpec, Placement, SurfaceHost,
    SurfaceStyle, WindowLevel,
};
pub use panel::PanelSlot;
pub use shortcuts::{display_mode_for, shortcut_for, Modifiers, Shortcut, DISPLAY_SHORTCUTS};

use tracing::info;

use crate::types::DisplayMode;

/// Coordinates which surface presents the timer.
pub struct WindowManager {
    active_mode: DisplayMode,
    host: Box<dyn SurfaceHost>,
    overlay: PanelSlot,
    floating: PanelSlot,
}

impl WindowManager {
    /// Creates a coordinator in `Window` mode. Nothing is shown until
    /// [`WindowManager::present`] or [`WindowManager::switch_to`] is called.
    pub fn new(host: Box<dyn SurfaceHost>) -> Self {
        Self {
            active_mode: DisplayMode::Window,
            host,
            overlay: PanelSlot::new(PanelKind::Overlay),
            floating: PanelSlot::new(PanelKind::Floating),
        }
    }

    #[must_use]
    pub fn active_mode(&self) -> DisplayMode {
        self.active_mode
    }

    #[must_use]
    pub fn is_overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    #[must_use]
    pub fn is_floating_visible(&self) -> bool {
        self.floating.is_visible()
    }

    /// Shows the surface of the current mode.
    pub fn present(&mut self, style: &SurfaceStyle) {
        self.stand_up(style);
    }

    /// Switches the presentation to `mode`.
    ///
    /// Switching to the panel mode that is already active toggles its panel:
    /// the teardown hides it and the setup shows it again.
    pub fn switch_to(&mut self, mode: DisplayMode, style: &SurfaceStyle) {
        info!(
            from = self.active_mode.as_str(),
            to = mode.as_str(),
            "Switching display mode"
        );

        self.tear_down();
        self.active_mode = mode;
        self.stand_up(style);
    }

    fn tear_down(&mut self) {
        match self.active_mode {
            DisplayMode::Window => self.host.hide_main_window(),
            DisplayMode::Overlay => self.overlay.hide(self.host.as_ref()),
            DisplayMode::Floating => self.floating.hide(self.host.as_ref()),
        }
    }

    fn stand_up(&mut self, style: &SurfaceStyle) {
        match self.active_mode {
            DisplayMode::Window => self.host.show_main_window(),
            DisplayMode::Overlay => {
                let spec = PanelSpec::overlay(&style.overlay, style.background.clone());
                self.overlay.show(self.host.as_ref(), &spec);
            }
            DisplayMode::Floating => {
                let spec = PanelSpec::floating(style.colors.clone());
                self.floating.show(self.host.as_ref(), &spec);
            }
        }
    }

    /// Closes the overlay panel from its own close control.
    ///
    /// The active mode is left unchanged.
    pub fn close_overlay(&mut self) {
        self.overlay.hide(self.host.as_ref());
    }

    /// Brings up the single settings surface.
    pub fn open_settings(&mut self) {
        self.host.show_settings();
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("active_mode", &self.active_mode)
            .field("overlay", &self.overlay)
            .field("floating", &self.floating)
            .finish_non_exhaustive()
    }
}
