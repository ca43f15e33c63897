//! Fixed-size inset overlay: a change-driven secondary view composited over
//! a corner of the viewport.
//!
//! The off-screen target has session lifetime: allocated once when the
//! overlay starts, sized from a fixed edge and the start-time render
//! aspect, released when it stops. Per frame, the scene is re-rendered only
//! when the camera's transforms actually changed; the (possibly stale)
//! texture is composited every frame.

use crate::compositor::{self, QuadPlacement, OPAQUE_WHITE};
use crate::error::OverlayResult;
use crate::gfx::GfxContext;
use crate::host::{DrawPhase, HookToken, OffscreenSurface, OverlayHost, ToggleOutcome};
use crate::offscreen::OffscreenSlot;
use crate::transform::{RenderGate, ViewTransform};

/// Edge length, in pixels, of the inset's off-screen target.
pub const INSET_TARGET_EDGE: u32 = 512;

/// Fraction of the viewport width covered by the composited inset.
pub const INSET_SCALE: f32 = 0.8;

/// Secondary-view overlay drawn as an inset over the viewport.
pub struct InsetOverlay<H: OverlayHost> {
    target: OffscreenSlot<H::Surface>,
    gate: RenderGate,
    hook: Option<HookToken>,
}

impl<H: OverlayHost> InsetOverlay<H> {
    pub fn new() -> Self {
        InsetOverlay {
            target: OffscreenSlot::new(),
            gate: RenderGate::new(),
            hook: None,
        }
    }

    /// Whether the overlay is currently enabled.
    pub fn is_running(&self) -> bool {
        self.hook.is_some()
    }

    /// Start the overlay, or stop it if it is already running.
    ///
    /// Starting allocates the off-screen target up front; on allocation
    /// failure the overlay stays stopped, no hook is registered, and the
    /// error is returned for the host to display.
    pub fn toggle(&mut self, host: &mut H) -> OverlayResult<ToggleOutcome> {
        if self.is_running() {
            self.stop(host);
            return Ok(ToggleOutcome::Stopped);
        }

        let (width, height) = inset_target_size(host.render_aspect());
        if let Err(err) = self.target.allocate(host, width, height) {
            log::error!("[Inset] failed to start: {err}");
            return Err(err);
        }
        self.hook = Some(host.add_draw_hook(DrawPhase::PostPixel));
        host.request_redraw();
        log::info!("[Inset] started with a {width}x{height} target");
        Ok(ToggleOutcome::Started)
    }

    /// Stop the overlay if it is running. A shutdown while already stopped
    /// is a complete no-op.
    pub fn shutdown(&mut self, host: &mut H) {
        if self.is_running() {
            self.stop(host);
        }
    }

    fn stop(&mut self, host: &mut H) {
        if let Some(token) = self.hook.take() {
            host.remove_draw_hook(token);
        }
        self.target.release();
        self.gate.clear();
        host.request_redraw();
        log::info!("[Inset] stopped");
    }

    /// Per-frame hook body. The host invokes this for every phase the
    /// overlay holds a registration for; other phases are ignored.
    pub fn on_frame<G: GfxContext>(&mut self, host: &mut H, gfx: &mut G, phase: DrawPhase) {
        if phase != DrawPhase::PostPixel || !self.is_running() {
            return;
        }
        let Some(camera) = host.active_camera() else {
            // Nothing to render this frame; the target keeps its contents.
            return;
        };
        let current = ViewTransform::capture(&camera);

        let Some(surface) = self.target.surface_mut() else {
            return;
        };
        if self.gate.should_render(&current) {
            host.render_view_into(surface, &current);
            self.gate.mark_rendered(current);
        }
        let texture = surface.color_texture();

        compositor::blit(
            gfx,
            texture,
            QuadPlacement::Inset {
                scale: INSET_SCALE,
                aspect: host.render_aspect(),
            },
            OPAQUE_WHITE,
        );
    }
}

impl<H: OverlayHost> Default for InsetOverlay<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Target dimensions for a given render aspect: a fixed edge wide, with the
/// height following from the aspect, rounded to the nearest pixel.
fn inset_target_size(aspect: f32) -> (u32, u32) {
    let height = (INSET_TARGET_EDGE as f32 / aspect).round() as u32;
    (INSET_TARGET_EDGE, height)
}
