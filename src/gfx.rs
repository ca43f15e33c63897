//! Immediate-mode graphics capabilities consumed by the compositor.
//!
//! The crate draws exactly one thing: a textured quad over a rectangular
//! region of the active viewport. [`GfxContext`] exposes the handful of
//! fixed-function primitives that requires. Everything here is synchronous
//! and only ever used from inside a host draw callback, on the thread that
//! owns the graphics context.

use glam::Mat4;

/// Opaque identifier for a GPU texture owned by the host.
///
/// The crate never dereferences the handle; it only records, rebinds, and
/// hands it back to the host's own draw primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Viewport/scissor rectangle in pixels, origin at the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// The two fixed-function matrix stacks the compositor touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixStack {
    Projection,
    ModelView,
}

/// Quad corners covering clip space `[-1, 1] x [-1, 1]`, starting at the
/// top-right corner and winding counter-clockwise.
pub const QUAD_CORNERS: [[f32; 2]; 4] = [[1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]];

/// Texture coordinates paired with [`QUAD_CORNERS`] index-for-index, mapping
/// the source image onto the quad without a vertical flip.
pub const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// One textured, colored quad in the compositor's clip-space frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
    /// Corner positions in clip space.
    pub corners: [[f32; 2]; 4],
    /// Texture coordinates paired with `corners` index-for-index.
    pub tex_coords: [[f32; 2]; 4],
    /// Flat vertex color; opaque white copies the texture through unmodified.
    pub color: [f32; 4],
}

/// Fixed-function graphics primitives the compositor draws through.
///
/// Implementations are expected to sit on an immediate-mode style API:
/// matrix stacks, a single 2D texture unit, and shared viewport/scissor
/// state. Texture binds target unit 0.
pub trait GfxContext {
    /// Whether depth testing is currently enabled.
    fn depth_test_enabled(&self) -> bool;

    /// Enable or disable depth testing.
    fn set_depth_test(&mut self, enabled: bool);

    /// Push a copy of the top of `stack`.
    fn push_matrix(&mut self, stack: MatrixStack);

    /// Pop the top of `stack`.
    fn pop_matrix(&mut self, stack: MatrixStack);

    /// Replace the top of `stack` with `matrix`.
    fn load_matrix(&mut self, stack: MatrixStack, matrix: Mat4);

    /// Current viewport rectangle.
    fn viewport(&self) -> Rect;

    /// Set the viewport rectangle.
    fn set_viewport(&mut self, rect: Rect);

    /// Set the scissor rectangle.
    fn set_scissor(&mut self, rect: Rect);

    /// Texture currently bound on unit 0, if any.
    fn bound_texture(&self) -> Option<TextureHandle>;

    /// Bind `texture` on unit 0; `None` unbinds.
    fn bind_texture(&mut self, texture: Option<TextureHandle>);

    /// Enable or disable 2D texturing for subsequent draws.
    fn set_texturing(&mut self, enabled: bool);

    /// Submit one quad using the currently bound texture and state.
    fn draw_quad(&mut self, quad: &TexturedQuad);
}
