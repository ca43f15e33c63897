//! Secondary-view compositing overlays for live interactive viewports.
//!
//! `periscope` renders a scene from an auxiliary camera into an off-screen
//! target and composites that target as a textured quad into the host's
//! viewport, every frame, without disturbing the host's own graphics state.
//!
//! Two controllers cover the two classic uses:
//! - [`InsetOverlay`]: fixed-size target composited as a corner inset,
//!   re-rendered only when the camera's transforms change.
//! - [`ScenePreviewOverlay`]: target synced to the viewport region,
//!   re-rendered every frame, composited behind or in front of the host's
//!   own geometry.
//!
//! Hosts integrate by implementing [`OverlayHost`] (scene and hook
//! capabilities) and [`GfxContext`] (immediate-mode draw primitives), then
//! forwarding their per-frame draw callbacks to
//! [`OverlaySession::on_frame`]. Everything runs synchronously on the
//! host's drawing thread; nothing outlives a single callback except the
//! off-screen target and the change-detection memo.

pub mod compositor;
pub mod error;
pub mod gfx;
pub mod host;
pub mod inset;
pub mod offscreen;
pub mod preview;
pub mod session;
pub mod transform;

#[cfg(test)]
pub(crate) mod testutil;

pub use compositor::{blit, screen_projection, screen_view, QuadPlacement, OPAQUE_WHITE};
pub use error::{OverlayError, OverlayResult, SurfaceError};
pub use gfx::{
    GfxContext, MatrixStack, Rect, TextureHandle, TexturedQuad, QUAD_CORNERS, QUAD_TEX_COORDS,
};
pub use host::{
    CompositingMode, DrawPhase, HookToken, OffscreenSurface, OverlayHost, ToggleOutcome,
};
pub use inset::{InsetOverlay, INSET_SCALE, INSET_TARGET_EDGE};
pub use offscreen::OffscreenSlot;
pub use preview::ScenePreviewOverlay;
pub use session::OverlaySession;
pub use transform::{RenderGate, ViewCamera, ViewTransform};
