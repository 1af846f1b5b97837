//! Surface host abstraction.
//!
//! The host is whatever actually puts pixels on screen. The coordinator only
//! tells it which surface to show or hide and with what panel settings.

use std::rc::Rc;
use std::sync::Mutex;

use crate::appearance::{Background, Color};
use crate::types::{OverlayConfig, TimerPosition};

// ============================================================================
// PanelSpec
// ============================================================================

/// Handle to a panel created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub u64);

/// The two panel-based presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Overlay,
    Floating,
}

/// Stacking level of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLevel {
    Normal,
    /// Above regular windows
    Floating,
}

/// Where a panel sits on the main screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Covers the whole screen frame
    FullScreen,
    /// Fixed size, origin offset back from the screen's top-right corner
    TopRight {
        width: f64,
        height: f64,
        inset_x: f64,
        inset_y: f64,
    },
}

/// Floating widget size in points.
pub const FLOATING_SIZE: (f64, f64) = (180.0, 120.0);

/// Floating widget origin offset from the top-right corner in points.
pub const FLOATING_INSET: (f64, f64) = (200.0, 150.0);

/// Everything the host needs to build a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub kind: PanelKind,
    pub placement: Placement,
    pub level: WindowLevel,
    /// Clicks pass through to the windows below
    pub ignores_mouse: bool,
    /// Dragging anywhere on the panel moves it
    pub movable_by_background: bool,
    /// Visible on every desktop space and next to full-screen apps
    pub joins_all_spaces: bool,
    pub opacity: f64,
    pub timer_position: TimerPosition,
    pub background: Background,
}

impl PanelSpec {
    /// Full-screen click-through overlay.
    #[must_use]
    pub fn overlay(config: &OverlayConfig, background: Background) -> Self {
        Self {
            kind: PanelKind::Overlay,
            placement: Placement::FullScreen,
            level: WindowLevel::Floating,
            ignores_mouse: true,
            movable_by_background: false,
            joins_all_spaces: true,
            opacity: config.opacity.clamp(0.1, 1.0),
            timer_position: config.position,
            background,
        }
    }

    /// Small always-on-top widget drawn with a linear gradient of `colors`.
    #[must_use]
    pub fn floating(colors: Vec<Color>) -> Self {
        Self {
            kind: PanelKind::Floating,
            placement: Placement::TopRight {
                width: FLOATING_SIZE.0,
                height: FLOATING_SIZE.1,
                inset_x: FLOATING_INSET.0,
                inset_y: FLOATING_INSET.1,
            },
            level: WindowLevel::Floating,
            ignores_mouse: false,
            movable_by_background: true,
            joins_all_spaces: true,
            opacity: 1.0,
            timer_position: TimerPosition::Center,
            background: Background::Linear {
                colors,
                angle: 135.0,
            },
        }
    }
}

/// Appearance inputs for building panel specs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceStyle {
    pub overlay: OverlayConfig,
    /// Resolved background of the selected preset
    pub background: Background,
    /// Colors of the selected preset
    pub colors: Vec<Color>,
}

// ============================================================================
// SurfaceHost
// ============================================================================

/// Puts the timer's surfaces on screen.
pub trait SurfaceHost {
    /// Shows the main window and brings it to the front.
    fn show_main_window(&self);

    /// Hides the main window without destroying it.
    fn hide_main_window(&self);

    /// Creates and shows a panel.
    fn show_panel(&self, spec: &PanelSpec) -> PanelId;

    /// Closes a panel created by [`SurfaceHost::show_panel`].
    fn hide_panel(&self, id: PanelId);

    /// Shows the settings surface, bringing it forward if already open.
    fn show_settings(&self);
}

impl<T: SurfaceHost + ?Sized> SurfaceHost for Rc<T> {
    fn show_main_window(&self) {
        (**self).show_main_window();
    }

    fn hide_main_window(&self) {
        (**self).hide_main_window();
    }

    fn show_panel(&self, spec: &PanelSpec) -> PanelId {
        (**self).show_panel(spec)
    }

    fn hide_panel(&self, id: PanelId) {
        (**self).hide_panel(id);
    }

    fn show_settings(&self) {
        (**self).show_settings();
    }
}

// ============================================================================
// MockSurfaceHost
// ============================================================================

/// A call recorded by [`MockSurfaceHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    ShowMainWindow,
    HideMainWindow,
    ShowPanel(PanelKind, PanelId),
    HidePanel(PanelId),
    ShowSettings,
}

/// Mock surface host for testing.
#[derive(Debug, Default)]
pub struct MockSurfaceHost {
    calls: Mutex<Vec<HostCall>>,
    specs: Mutex<Vec<PanelSpec>>,
    next_id: Mutex<u64>,
}

impl MockSurfaceHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Specs passed to `show_panel`, in order.
    #[must_use]
    pub fn panel_specs(&self) -> Vec<PanelSpec> {
        self.specs.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SurfaceHost for MockSurfaceHost {
    fn show_main_window(&self) {
        self.record(HostCall::ShowMainWindow);
    }

    fn hide_main_window(&self) {
        self.record(HostCall::HideMainWindow);
    }

    fn show_panel(&self, spec: &PanelSpec) -> PanelId {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            PanelId(*next)
        };
        self.specs.lock().unwrap().push(spec.clone());
        self.record(HostCall::ShowPanel(spec.kind, id));
        id
    }

    fn hide_panel(&self, id: PanelId) {
        self.record(HostCall::HidePanel(id));
    }

    fn show_settings(&self) {
        self.record(HostCall::ShowSettings);
    }
}
