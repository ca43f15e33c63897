//! Full-region scene preview overlay with selectable compositing placement.
//!
//! The off-screen target tracks the viewport region's pixel dimensions and
//! is reallocated whenever the region is resized. The scene is re-rendered
//! every frame; the host's [`CompositingMode`] decides each frame whether
//! the composite happens before the host draws its own 3D content
//! (background) or after it (foreground).

use crate::compositor::{self, QuadPlacement, OPAQUE_WHITE};
use crate::error::OverlayResult;
use crate::gfx::GfxContext;
use crate::host::{
    CompositingMode, DrawPhase, HookToken, OffscreenSurface, OverlayHost, ToggleOutcome,
};
use crate::offscreen::OffscreenSlot;
use crate::transform::ViewTransform;

/// Draw-hook registrations for both phases; both live and die together.
struct PreviewHooks {
    pre_view: HookToken,
    post_view: HookToken,
}

/// Scene preview overlay covering the whole viewport region.
pub struct ScenePreviewOverlay<H: OverlayHost> {
    target: OffscreenSlot<H::Surface>,
    hooks: Option<PreviewHooks>,
}

impl<H: OverlayHost> ScenePreviewOverlay<H> {
    pub fn new() -> Self {
        ScenePreviewOverlay {
            target: OffscreenSlot::new(),
            hooks: None,
        }
    }

    /// Whether the overlay is currently enabled.
    pub fn is_running(&self) -> bool {
        self.hooks.is_some()
    }

    /// Start the overlay, or stop it if it is already running.
    ///
    /// Both draw phases are hooked up front; each frame the host's
    /// compositing mode picks which one actually draws. Starting allocates
    /// the target at the current region size; on allocation failure the
    /// overlay stays stopped and no hooks are registered.
    pub fn toggle(&mut self, host: &mut H) -> OverlayResult<ToggleOutcome> {
        if self.is_running() {
            self.stop(host);
            return Ok(ToggleOutcome::Stopped);
        }

        let (width, height) = host.region_size();
        if let Err(err) = self.target.allocate(host, width, height) {
            log::error!("[ScenePreview] failed to start: {err}");
            return Err(err);
        }
        self.hooks = Some(PreviewHooks {
            pre_view: host.add_draw_hook(DrawPhase::PreView),
            post_view: host.add_draw_hook(DrawPhase::PostView),
        });
        host.request_redraw();
        log::info!("[ScenePreview] started with a {width}x{height} target");
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
        if let Some(hooks) = self.hooks.take() {
            host.remove_draw_hook(hooks.pre_view);
            host.remove_draw_hook(hooks.post_view);
        }
        self.target.release();
        host.request_redraw();
        log::info!("[ScenePreview] stopped");
    }

    /// Per-frame hook body; runs once per registered phase. The phase not
    /// selected by the current compositing mode is a no-op, so exactly one
    /// composite happens per displayed frame.
    pub fn on_frame<G: GfxContext>(&mut self, host: &mut H, gfx: &mut G, phase: DrawPhase) {
        if !self.is_running() || !draws_in_phase(host.compositing_mode(), phase) {
            return;
        }
        let Some(camera) = host.active_camera() else {
            return;
        };
        let transform = ViewTransform::capture(&camera);

        let (width, height) = host.region_size();
        let Some(surface) = self.target.ensure(host, width, height) else {
            return;
        };
        host.render_view_into(surface, &transform);
        let texture = surface.color_texture();

        compositor::blit(gfx, texture, QuadPlacement::FullViewport, OPAQUE_WHITE);
    }
}

impl<H: OverlayHost> Default for ScenePreviewOverlay<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Background composites before the host's own geometry (pre-view phase),
/// foreground after it (post-view phase).
fn draws_in_phase(mode: CompositingMode, phase: DrawPhase) -> bool {
    match phase {
        DrawPhase::PreView => mode == CompositingMode::Background,
        DrawPhase::PostView => mode == CompositingMode::Foreground,
        DrawPhase::PostPixel => false,
    }
}
