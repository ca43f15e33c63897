//! Shared test doubles: a scriptable host, a state-modeling graphics
//! context, and a frame-driving helper that honors hook registration the
//! way a real host would.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::error::SurfaceError;
use crate::gfx::{GfxContext, MatrixStack, Rect, TextureHandle, TexturedQuad};
use crate::host::{CompositingMode, DrawPhase, HookToken, OffscreenSurface, OverlayHost};
use crate::transform::{ViewCamera, ViewTransform};

/// Camera returning fixed matrices.
#[derive(Debug, Clone, Copy)]
pub struct MockCamera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl MockCamera {
    /// Distinct, easily distinguishable matrices derived from `seed`.
    pub fn seeded(seed: f32) -> Self {
        MockCamera {
            view: Mat4::from_translation(Vec3::new(seed, 0.0, 0.0)),
            projection: Mat4::from_translation(Vec3::new(0.0, seed, 0.0)),
        }
    }
}

impl ViewCamera for MockCamera {
    fn world_to_view(&self) -> Mat4 {
        self.view
    }

    fn view_to_clip(&self) -> Mat4 {
        self.projection
    }
}

/// Surface that counts its own drop through a shared counter.
pub struct MockSurface {
    width: u32,
    height: u32,
    texture: Option<TextureHandle>,
    drops: Rc<Cell<usize>>,
}

impl OffscreenSurface for MockSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// Scriptable host: counters for every capability call plus knobs tests
/// flip between frames.
pub struct MockHost {
    pub camera: Option<MockCamera>,
    pub aspect: f32,
    pub region: (u32, u32),
    pub mode: CompositingMode,
    /// While true, `create_offscreen` fails.
    pub fail_allocations: bool,
    /// While true, created surfaces report no color texture, modeling a
    /// torn-down graphics context.
    pub textureless_surfaces: bool,
    /// Currently registered hooks, in registration order.
    pub hooks: Vec<(HookToken, DrawPhase)>,
    /// Dimensions of every `create_offscreen` call that succeeded.
    pub create_log: Vec<(u32, u32)>,
    /// Number of `create_offscreen` calls, successful or not.
    pub create_attempts: usize,
    /// Number of surfaces successfully created.
    pub created: usize,
    /// Number of `remove_draw_hook` calls.
    pub removed_hooks: usize,
    /// Number of `request_redraw` calls.
    pub redraw_requests: usize,
    /// Every transform passed to `render_view_into`, in order.
    pub render_log: Vec<ViewTransform>,
    drops: Rc<Cell<usize>>,
    next_token: u64,
}

impl MockHost {
    pub fn new() -> Self {
        MockHost {
            camera: Some(MockCamera::seeded(1.0)),
            aspect: 1.0,
            region: (640, 480),
            mode: CompositingMode::default(),
            fail_allocations: false,
            textureless_surfaces: false,
            hooks: Vec::new(),
            create_log: Vec::new(),
            create_attempts: 0,
            created: 0,
            removed_hooks: 0,
            redraw_requests: 0,
            render_log: Vec::new(),
            drops: Rc::new(Cell::new(0)),
            next_token: 0,
        }
    }

    /// Number of surfaces released so far.
    pub fn dropped_surfaces(&self) -> usize {
        self.drops.get()
    }

    pub fn has_hook(&self, phase: DrawPhase) -> bool {
        self.hooks.iter().any(|(_, p)| *p == phase)
    }
}

impl OverlayHost for MockHost {
    type Camera = MockCamera;
    type Surface = MockSurface;

    fn active_camera(&self) -> Option<MockCamera> {
        self.camera
    }

    fn render_aspect(&self) -> f32 {
        self.aspect
    }

    fn region_size(&self) -> (u32, u32) {
        self.region
    }

    fn create_offscreen(&mut self, width: u32, height: u32) -> Result<MockSurface, SurfaceError> {
        self.create_attempts += 1;
        if self.fail_allocations {
            return Err(SurfaceError::new("scripted allocation failure"));
        }
        self.created += 1;
        self.create_log.push((width, height));
        let texture = if self.textureless_surfaces {
            None
        } else {
            Some(TextureHandle(100 + self.created as u64))
        };
        Ok(MockSurface {
            width,
            height,
            texture,
            drops: Rc::clone(&self.drops),
        })
    }

    fn render_view_into(&mut self, _surface: &mut MockSurface, transform: &ViewTransform) {
        self.render_log.push(*transform);
    }

    fn add_draw_hook(&mut self, phase: DrawPhase) -> HookToken {
        self.next_token += 1;
        let token = HookToken(self.next_token);
        self.hooks.push((token, phase));
        token
    }

    fn remove_draw_hook(&mut self, token: HookToken) {
        self.removed_hooks += 1;
        self.hooks.retain(|(t, _)| *t != token);
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }
}

/// Snapshot of everything relevant at the moment a quad was submitted.
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub quad: TexturedQuad,
    pub bound: Option<TextureHandle>,
    pub texturing: bool,
    pub depth_test: bool,
    pub viewport: Rect,
    pub scissor: Rect,
    pub projection_top: Mat4,
    pub modelview_top: Mat4,
}

/// The state a compositing call must leave untouched, as one comparable
/// value. The 2D-texturing flag is deliberately excluded: compositing is
/// specified to leave it disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct GfxStateSnapshot {
    pub depth_test: bool,
    pub bound: Option<TextureHandle>,
    pub viewport: Rect,
    pub scissor: Rect,
    pub projection_stack: Vec<Mat4>,
    pub modelview_stack: Vec<Mat4>,
}

/// Graphics context that models matrix stacks, bindings, and rectangles
/// faithfully enough to verify save/restore round trips.
pub struct MockGfx {
    pub depth_test: bool,
    pub texturing: bool,
    pub bound: Option<TextureHandle>,
    pub viewport: Rect,
    pub scissor: Rect,
    pub projection_stack: Vec<Mat4>,
    pub modelview_stack: Vec<Mat4>,
    pub draws: Vec<DrawRecord>,
}

impl MockGfx {
    pub fn new() -> Self {
        MockGfx {
            depth_test: true,
            texturing: false,
            bound: None,
            viewport: Rect::new(0, 0, 640, 480),
            scissor: Rect::new(0, 0, 640, 480),
            projection_stack: vec![Mat4::IDENTITY],
            modelview_stack: vec![Mat4::IDENTITY],
            draws: Vec::new(),
        }
    }

    pub fn state_snapshot(&self) -> GfxStateSnapshot {
        GfxStateSnapshot {
            depth_test: self.depth_test,
            bound: self.bound,
            viewport: self.viewport,
            scissor: self.scissor,
            projection_stack: self.projection_stack.clone(),
            modelview_stack: self.modelview_stack.clone(),
        }
    }

    fn stack_mut(&mut self, stack: MatrixStack) -> &mut Vec<Mat4> {
        match stack {
            MatrixStack::Projection => &mut self.projection_stack,
            MatrixStack::ModelView => &mut self.modelview_stack,
        }
    }

    fn top(&self, stack: MatrixStack) -> Mat4 {
        let stack = match stack {
            MatrixStack::Projection => &self.projection_stack,
            MatrixStack::ModelView => &self.modelview_stack,
        };
        *stack.last().expect("matrix stack underflow")
    }
}

impl GfxContext for MockGfx {
    fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    fn push_matrix(&mut self, stack: MatrixStack) {
        let stack = self.stack_mut(stack);
        let top = *stack.last().expect("matrix stack underflow");
        stack.push(top);
    }

    fn pop_matrix(&mut self, stack: MatrixStack) {
        let stack = self.stack_mut(stack);
        assert!(stack.len() > 1, "popped the base matrix stack level");
        stack.pop();
    }

    fn load_matrix(&mut self, stack: MatrixStack, matrix: Mat4) {
        *self
            .stack_mut(stack)
            .last_mut()
            .expect("matrix stack underflow") = matrix;
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn set_viewport(&mut self, rect: Rect) {
        self.viewport = rect;
    }

    fn set_scissor(&mut self, rect: Rect) {
        self.scissor = rect;
    }

    fn bound_texture(&self) -> Option<TextureHandle> {
        self.bound
    }

    fn bind_texture(&mut self, texture: Option<TextureHandle>) {
        self.bound = texture;
    }

    fn set_texturing(&mut self, enabled: bool) {
        self.texturing = enabled;
    }

    fn draw_quad(&mut self, quad: &TexturedQuad) {
        let record = DrawRecord {
            quad: *quad,
            bound: self.bound,
            texturing: self.texturing,
            depth_test: self.depth_test,
            viewport: self.viewport,
            scissor: self.scissor,
            projection_top: self.top(MatrixStack::Projection),
            modelview_top: self.top(MatrixStack::ModelView),
        };
        self.draws.push(record);
    }
}

/// Invoke `body` once per phase the host currently holds a hook for, in
/// the host's draw order. This mirrors the host contract: controllers are
/// only dispatched for phases they registered.
pub fn drive_frame<F>(host: &mut MockHost, gfx: &mut MockGfx, mut body: F)
where
    F: FnMut(&mut MockHost, &mut MockGfx, DrawPhase),
{
    for phase in [DrawPhase::PreView, DrawPhase::PostView, DrawPhase::PostPixel] {
        if host.has_hook(phase) {
            body(host, gfx, phase);
        }
    }
}
