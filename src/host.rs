//! Host capability seams.
//!
//! The controllers never see the hosting application's scene graph, window
//! system, or GPU backend. They see [`OverlayHost`]: a narrow set of
//! capabilities the host implements once and passes `&mut` into every
//! toggle and draw callback. All calls happen on the thread driving the
//! host's draw loop.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::gfx::TextureHandle;
use crate::transform::{ViewCamera, ViewTransform};

/// Drawing phases a controller can hook into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawPhase {
    /// After the host's 2D pixel pass (UI-space drawing).
    PostPixel,
    /// Before the host draws its own 3D content.
    PreView,
    /// After the host draws its own 3D content.
    PostView,
}

/// Opaque receipt for a registered draw hook, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookToken(pub u64);

/// Where the full-view overlay sits relative to the host's own 3D content.
///
/// Owned and persisted by the host's configuration store; the overlay only
/// reads it, fresh, every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositingMode {
    /// Composite before the host's geometry, so the overlay sits behind it.
    #[default]
    Background,
    /// Composite after the host's geometry, so the overlay sits in front.
    Foreground,
}

/// Completion signal of a controller toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The overlay was stopped and is now running.
    Started,
    /// The overlay was running and is now stopped.
    Stopped,
}

/// A GPU-side color target owned by the host, rendered into off screen and
/// sampled during compositing.
///
/// Dropping the surface frees the GPU image.
pub trait OffscreenSurface {
    /// Pixel width.
    fn width(&self) -> u32;

    /// Pixel height.
    fn height(&self) -> u32;

    /// Handle to the backing color texture, or `None` once the owning
    /// graphics context has been torn down.
    fn color_texture(&self) -> Option<TextureHandle>;
}

/// Everything the overlay controllers need from the hosting application.
pub trait OverlayHost {
    /// Camera type providing view/projection snapshots.
    type Camera: ViewCamera;

    /// Off-screen render target type.
    type Surface: OffscreenSurface;

    /// The scene's active camera, or `None` when there is nothing to
    /// render this frame.
    fn active_camera(&self) -> Option<Self::Camera>;

    /// Aspect ratio (width / height) of the host's configured render
    /// output. Must be positive and finite.
    fn render_aspect(&self) -> f32;

    /// Current pixel dimensions of the viewport region being drawn into.
    fn region_size(&self) -> (u32, u32);

    /// Allocate an off-screen surface of the given pixel dimensions.
    fn create_offscreen(&mut self, width: u32, height: u32) -> Result<Self::Surface, SurfaceError>;

    /// Rasterize the scene as seen through `transform` into `surface`.
    fn render_view_into(&mut self, surface: &mut Self::Surface, transform: &ViewTransform);

    /// Register a per-frame draw hook. The host invokes the controller for
    /// `phase` on every displayed frame until the returned token is passed
    /// back to [`remove_draw_hook`](OverlayHost::remove_draw_hook).
    fn add_draw_hook(&mut self, phase: DrawPhase) -> HookToken;

    /// Unregister a previously added draw hook.
    fn remove_draw_hook(&mut self, token: HookToken);

    /// Ask the host to redraw the viewport soon. Best-effort hint.
    fn request_redraw(&mut self);

    /// Current compositing placement for the full-view overlay. Hosts that
    /// do not expose the setting keep the default.
    fn compositing_mode(&self) -> CompositingMode {
        CompositingMode::Background
    }
}
