//! View-transform capture and change detection.
//!
//! A [`ViewTransform`] is an immutable snapshot of the matrix pair that
//! fully determines what a camera sees. [`RenderGate`] memoizes the snapshot
//! that last populated the off-screen target so the expensive scene
//! re-render can be skipped on frames where nothing moved.

use glam::Mat4;

/// Read access to a camera's current transforms.
pub trait ViewCamera {
    /// World-to-camera (view) matrix.
    fn world_to_view(&self) -> Mat4;

    /// Camera-to-clip (projection) matrix.
    fn view_to_clip(&self) -> Mat4;
}

/// Snapshot of a camera's view and projection matrices.
///
/// Compared with exact componentwise equality: any bit-level difference in
/// either matrix counts as a change. Snapshotting into `Mat4` at capture
/// time pins that semantics regardless of how the host's own camera types
/// compare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// World-to-camera matrix.
    pub view: Mat4,
    /// Camera-to-clip matrix.
    pub projection: Mat4,
}

impl ViewTransform {
    /// Identity view and projection. A degenerate fallback value; the
    /// controllers never composite it in place of a missing camera.
    pub const IDENTITY: Self = ViewTransform {
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
    };

    /// Snapshot `camera`'s current transforms.
    pub fn capture<C: ViewCamera>(camera: &C) -> Self {
        ViewTransform {
            view: camera.world_to_view(),
            projection: camera.view_to_clip(),
        }
    }
}

/// Decides whether the off-screen view must be re-rendered this frame.
///
/// Holds the transform that last populated the target. Staleness is never
/// an error: a stale memo only means the composited image lags behind the
/// true transform until the next change.
#[derive(Debug, Default)]
pub struct RenderGate {
    rendered: Option<ViewTransform>,
}

impl RenderGate {
    pub fn new() -> Self {
        RenderGate { rendered: None }
    }

    /// True when nothing has been rendered yet or `current` differs from
    /// the transform that produced the cached image.
    pub fn should_render(&self, current: &ViewTransform) -> bool {
        match &self.rendered {
            Some(previous) => previous != current,
            None => true,
        }
    }

    /// Record the transform that was just rendered.
    pub fn mark_rendered(&mut self, rendered: ViewTransform) {
        self.rendered = Some(rendered);
    }

    /// Forget the memo so the next frame re-renders unconditionally.
    pub fn clear(&mut self) {
        self.rendered = None;
    }
}
