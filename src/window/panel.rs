//! Single-instance panel controller.

use tracing::debug;

use super::host::{PanelId, PanelKind, PanelSpec, SurfaceHost};

/// Holds at most one live panel of a kind.
///
/// Showing while the panel is live closes it instead, so a repeated request
/// toggles the panel off.
#[derive(Debug)]
pub struct PanelSlot {
    kind: PanelKind,
    live: Option<PanelId>,
}

impl PanelSlot {
    #[must_use]
    pub fn new(kind: PanelKind) -> Self {
        Self { kind, live: None }
    }

    /// Shows the panel, or hides it if it is already live.
    ///
    /// Returns true if the panel is visible afterwards.
    pub fn show(&mut self, host: &dyn SurfaceHost, spec: &PanelSpec) -> bool {
        if self.live.is_some() {
            debug!(kind = ?self.kind, "Panel already shown, toggling off");
            self.hide(host);
            return false;
        }

        let id = host.show_panel(spec);
        debug!(kind = ?self.kind, id = id.0, "Panel shown");
        self.live = Some(id);
        true
    }

    /// Hides the panel if it is live.
    pub fn hide(&mut self, host: &dyn SurfaceHost) {
        if let Some(id) = self.live.take() {
            host.hide_panel(id);
            debug!(kind = ?self.kind, id = id.0, "Panel hidden");
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.live.is_some()
    }

    #[must_use]
    pub fn kind(&self) -> PanelKind {
        self.kind
    }
}
