//! Graphics-state-scoped compositing of an off-screen texture.
//!
//! [`blit`] is the only drawing operation in the crate: one textured quad
//! over a region of the active viewport, bracketed by a save of every piece
//! of graphics state it touches and an unconditional restore. Leaked state
//! here would corrupt all of the host's subsequent drawing for the rest of
//! the session, so the restore runs even when the draw itself is skipped.

use glam::{Mat4, Vec3};

use crate::gfx::{
    GfxContext, MatrixStack, Rect, TextureHandle, TexturedQuad, QUAD_CORNERS, QUAD_TEX_COORDS,
};

/// Flat quad color that copies the texture through unmodified.
pub const OPAQUE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Destination region for the composited quad, resolved against the
/// viewport rectangle recorded at the start of the blit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadPlacement {
    /// Cover the recorded viewport exactly.
    FullViewport,
    /// A sub-rectangle anchored at the viewport origin: `scale` times the
    /// viewport width, with height following from `aspect`.
    Inset { scale: f32, aspect: f32 },
}

impl QuadPlacement {
    /// Resolve to concrete pixel bounds within `viewport`, rounded to the
    /// nearest pixel.
    pub fn resolve(&self, viewport: Rect) -> Rect {
        match *self {
            QuadPlacement::FullViewport => viewport,
            QuadPlacement::Inset { scale, aspect } => {
                let width = scale * viewport.width as f32;
                let height = width / aspect;
                Rect::new(
                    viewport.x,
                    viewport.y,
                    width.round() as i32,
                    height.round() as i32,
                )
            }
        }
    }
}

/// Projection half of the compositor's 2D screen frame.
pub fn screen_projection() -> Mat4 {
    Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, -15.0, 15.0)
}

/// View half of the compositor's 2D screen frame: eye at (0, 0, 1) looking
/// at the origin, up along +Y.
pub fn screen_view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::Y)
}

/// Draw `texture` as a flat quad over `placement`, leaving every piece of
/// saved graphics state exactly as found.
///
/// The bracket: disable depth testing, push both matrix stacks and load the
/// 2D screen frame, record the bound texture and viewport, retarget the
/// viewport/scissor to the resolved destination, draw, then restore in
/// reverse order. When `texture` is `None` (torn-down context) the draw is
/// skipped but the bracket still runs in full.
///
/// The scissor rectangle is restored to the recorded viewport rectangle;
/// hosts treat the two as one region for the duration of a draw callback.
/// 2D texturing is left disabled on exit.
pub fn blit<G: GfxContext>(
    gfx: &mut G,
    texture: Option<TextureHandle>,
    placement: QuadPlacement,
    tint: [f32; 4],
) {
    let depth_test_was_enabled = gfx.depth_test_enabled();
    gfx.set_depth_test(false);

    gfx.push_matrix(MatrixStack::Projection);
    gfx.load_matrix(MatrixStack::Projection, screen_projection());
    gfx.push_matrix(MatrixStack::ModelView);
    gfx.load_matrix(MatrixStack::ModelView, screen_view());

    let saved_texture = gfx.bound_texture();
    let saved_viewport = gfx.viewport();

    let dest = placement.resolve(saved_viewport);
    gfx.set_viewport(dest);
    gfx.set_scissor(dest);

    if let Some(texture) = texture {
        gfx.set_texturing(true);
        gfx.bind_texture(Some(texture));
        gfx.draw_quad(&TexturedQuad {
            corners: QUAD_CORNERS,
            tex_coords: QUAD_TEX_COORDS,
            color: tint,
        });
    }

    // Restore in reverse order, unconditionally.
    gfx.bind_texture(saved_texture);
    gfx.set_texturing(false);
    gfx.pop_matrix(MatrixStack::ModelView);
    gfx.pop_matrix(MatrixStack::Projection);
    gfx.set_viewport(saved_viewport);
    gfx.set_scissor(saved_viewport);
    gfx.set_depth_test(depth_test_was_enabled);
}
