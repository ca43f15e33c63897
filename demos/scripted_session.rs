//! Drives both overlays against a scripted in-memory host for a few frames.
//!
//! Run with `RUST_LOG=info` to also see the controllers' own log output:
//!
//! ```sh
//! RUST_LOG=info cargo run --example scripted_session
//! ```

use glam::{Mat4, Vec3};
use periscope::{
    CompositingMode, DrawPhase, GfxContext, HookToken, MatrixStack, OffscreenSurface, OverlayHost,
    OverlaySession, Rect, SurfaceError, TextureHandle, TexturedQuad, ViewCamera, ViewTransform,
};

#[derive(Clone, Copy)]
struct Camera {
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    fn at(x: f32) -> Self {
        Camera {
            view: Mat4::from_translation(Vec3::new(-x, 0.0, -10.0)),
            projection: Mat4::perspective_rh_gl(
                std::f32::consts::FRAC_PI_3,
                16.0 / 9.0,
                0.1,
                100.0,
            ),
        }
    }
}

impl ViewCamera for Camera {
    fn world_to_view(&self) -> Mat4 {
        self.view
    }

    fn view_to_clip(&self) -> Mat4 {
        self.projection
    }
}

struct Surface {
    width: u32,
    height: u32,
    texture: TextureHandle,
}

impl OffscreenSurface for Surface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_texture(&self) -> Option<TextureHandle> {
        Some(self.texture)
    }
}

struct Host {
    camera: Camera,
    region: (u32, u32),
    mode: CompositingMode,
    hooks: Vec<(HookToken, DrawPhase)>,
    next_token: u64,
    next_texture: u64,
    renders: usize,
}

impl Host {
    fn new() -> Self {
        Host {
            camera: Camera::at(0.0),
            region: (1280, 720),
            mode: CompositingMode::Background,
            hooks: Vec::new(),
            next_token: 0,
            next_texture: 0,
            renders: 0,
        }
    }
}

impl OverlayHost for Host {
    type Camera = Camera;
    type Surface = Surface;

    fn active_camera(&self) -> Option<Camera> {
        Some(self.camera)
    }

    fn render_aspect(&self) -> f32 {
        16.0 / 9.0
    }

    fn region_size(&self) -> (u32, u32) {
        self.region
    }

    fn create_offscreen(&mut self, width: u32, height: u32) -> Result<Surface, SurfaceError> {
        self.next_texture += 1;
        println!("  [host] allocated {width}x{height} target (texture #{})", self.next_texture);
        Ok(Surface {
            width,
            height,
            texture: TextureHandle(self.next_texture),
        })
    }

    fn render_view_into(&mut self, surface: &mut Surface, _transform: &ViewTransform) {
        self.renders += 1;
        println!(
            "  [host] scene rendered into the {}x{} target",
            surface.width(),
            surface.height()
        );
    }

    fn add_draw_hook(&mut self, phase: DrawPhase) -> HookToken {
        self.next_token += 1;
        let token = HookToken(self.next_token);
        self.hooks.push((token, phase));
        println!("  [host] hook registered for {phase:?}");
        token
    }

    fn remove_draw_hook(&mut self, token: HookToken) {
        self.hooks.retain(|(t, _)| *t != token);
    }

    fn request_redraw(&mut self) {}

    fn compositing_mode(&self) -> CompositingMode {
        self.mode
    }
}

struct Gfx {
    depth_test: bool,
    texturing: bool,
    bound: Option<TextureHandle>,
    viewport: Rect,
    scissor: Rect,
    projection: Vec<Mat4>,
    modelview: Vec<Mat4>,
}

impl Gfx {
    fn new() -> Self {
        Gfx {
            depth_test: true,
            texturing: false,
            bound: None,
            viewport: Rect::new(0, 0, 1280, 720),
            scissor: Rect::new(0, 0, 1280, 720),
            projection: vec![Mat4::IDENTITY],
            modelview: vec![Mat4::IDENTITY],
        }
    }

    fn stack(&mut self, stack: MatrixStack) -> &mut Vec<Mat4> {
        match stack {
            MatrixStack::Projection => &mut self.projection,
            MatrixStack::ModelView => &mut self.modelview,
        }
    }

    fn is_pristine(&self) -> bool {
        self.depth_test
            && !self.texturing
            && self.bound.is_none()
            && self.viewport == Rect::new(0, 0, 1280, 720)
            && self.scissor == Rect::new(0, 0, 1280, 720)
            && self.projection.len() == 1
            && self.modelview.len() == 1
    }
}

impl GfxContext for Gfx {
    fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    fn push_matrix(&mut self, stack: MatrixStack) {
        let stack = self.stack(stack);
        if let Some(top) = stack.last().copied() {
            stack.push(top);
        }
    }

    fn pop_matrix(&mut self, stack: MatrixStack) {
        let stack = self.stack(stack);
        if stack.len() > 1 {
            stack.pop();
        }
    }

    fn load_matrix(&mut self, stack: MatrixStack, matrix: Mat4) {
        if let Some(top) = self.stack(stack).last_mut() {
            *top = matrix;
        }
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

    fn draw_quad(&mut self, _quad: &TexturedQuad) {
        let vp = self.viewport;
        let texture = self.bound.map(|t| t.0).unwrap_or(0);
        println!(
            "  [gfx] quad over {}x{} at ({}, {}) sampling texture #{texture}",
            vp.width, vp.height, vp.x, vp.y
        );
    }
}

fn run_frame(host: &mut Host, gfx: &mut Gfx, session: &mut OverlaySession<Host>) {
    for phase in [DrawPhase::PreView, DrawPhase::PostView, DrawPhase::PostPixel] {
        if host.hooks.iter().any(|(_, p)| *p == phase) {
            session.on_frame(host, gfx, phase);
        }
    }
}

fn main() {
    env_logger::init();

    let mut host = Host::new();
    let mut gfx = Gfx::new();
    let mut session = OverlaySession::new();

    println!("=== Inset overlay: change-driven rendering ===\n");
    session.inset.toggle(&mut host).expect("inset overlay failed to start");

    let camera_track = [0.0_f32, 0.0, 0.0, 1.0, 1.0, 2.0];
    for (frame, x) in camera_track.iter().enumerate() {
        println!("frame {frame} (camera at x = {x}):");
        host.camera = Camera::at(*x);
        run_frame(&mut host, &mut gfx, &mut session);
    }
    println!(
        "\n{} scene renders across {} frames; unchanged frames reuse the cached texture\n",
        host.renders,
        camera_track.len()
    );

    println!("=== Scene preview overlay: background vs foreground ===\n");
    session
        .preview
        .toggle(&mut host)
        .expect("preview overlay failed to start");

    println!("frame 6 (background mode; preview draws before the host's geometry):");
    run_frame(&mut host, &mut gfx, &mut session);

    host.mode = CompositingMode::Foreground;
    println!("frame 7 (foreground mode; preview draws after the host's geometry):");
    run_frame(&mut host, &mut gfx, &mut session);

    host.region = (1920, 1080);
    println!("frame 8 (region resized; target follows):");
    run_frame(&mut host, &mut gfx, &mut session);

    session.shutdown(&mut host);
    println!("\nall hooks removed: {}", host.hooks.is_empty());
    println!("graphics state left pristine: {}", gfx.is_pristine());
}
