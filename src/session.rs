//! Session-scoped ownership of one overlay of each kind.
//!
//! At most one active instance of each overlay kind exists per session.
//! Rather than enforcing that through ambient global state, the hosting
//! application owns an [`OverlaySession`] and passes it `&mut` into its
//! frame-hook dispatch and shutdown paths.

use crate::gfx::GfxContext;
use crate::host::{DrawPhase, OverlayHost};
use crate::inset::InsetOverlay;
use crate::preview::ScenePreviewOverlay;

/// One controller of each overlay kind, toggled independently.
pub struct OverlaySession<H: OverlayHost> {
    /// Fixed-size, change-driven inset overlay.
    pub inset: InsetOverlay<H>,
    /// Region-synced, always-rendering preview overlay.
    pub preview: ScenePreviewOverlay<H>,
}

impl<H: OverlayHost> OverlaySession<H> {
    pub fn new() -> Self {
        OverlaySession {
            inset: InsetOverlay::new(),
            preview: ScenePreviewOverlay::new(),
        }
    }

    /// Forward one draw-phase callback to both overlays. Each controller
    /// ignores phases it has no registration for, so dispatching every
    /// phase here is safe.
    pub fn on_frame<G: GfxContext>(&mut self, host: &mut H, gfx: &mut G, phase: DrawPhase) {
        self.inset.on_frame(host, gfx, phase);
        self.preview.on_frame(host, gfx, phase);
    }

    /// Stop both overlays. Safe to call at any time, in any state.
    pub fn shutdown(&mut self, host: &mut H) {
        self.inset.shutdown(host);
        self.preview.shutdown(host);
    }
}

impl<H: OverlayHost> Default for OverlaySession<H> {
    fn default() -> Self {
        Self::new()
    }
}
