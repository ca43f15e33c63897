//! Off-screen target lifecycle.
//!
//! [`OffscreenSlot`] owns at most one off-screen surface and keeps it in
//! sync with requested dimensions: allocate on first use or on dimension
//! change, release on shutdown, retry lazily after failures. Both sizing
//! policies (fixed-edge session target and region-synced target) run
//! through this one component.

use crate::error::{OverlayError, OverlayResult};
use crate::host::{OffscreenSurface, OverlayHost};

/// Holder for one off-screen surface and its allocation bookkeeping.
///
/// A slot is either empty or holds a fully valid surface whose tracked
/// dimensions match what it was created with; partially initialized targets
/// are never observable. Dropping the held surface is what frees the GPU
/// image, so `release` is just a drop plus a sentinel reset.
#[derive(Debug)]
pub struct OffscreenSlot<S> {
    surface: Option<S>,
    width: u32,
    height: u32,
    reported_failure: Option<(u32, u32)>,
}

impl<S> OffscreenSlot<S> {
    /// Empty slot; dimensions start at the 0x0 "unset" sentinel.
    pub const fn new() -> Self {
        OffscreenSlot {
            surface: None,
            width: 0,
            height: 0,
            reported_failure: None,
        }
    }

    /// The held surface, if any.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable access to the held surface, if any.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Dimensions of the held surface, or `None` while the slot is empty.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|_| (self.width, self.height))
    }

    /// Drop the held surface and reset dimensions to the unset sentinel so
    /// the next `ensure`/`allocate` always reallocates. Idempotent.
    pub fn release(&mut self) {
        self.reset();
        self.reported_failure = None;
    }

    fn reset(&mut self) {
        self.surface = None;
        self.width = 0;
        self.height = 0;
    }

    #[cfg(test)]
    pub(crate) fn reported_failure(&self) -> Option<(u32, u32)> {
        self.reported_failure
    }
}

impl<S: OffscreenSurface> OffscreenSlot<S> {
    /// Return a surface of exactly `width` x `height`, reallocating if the
    /// held one has different dimensions.
    ///
    /// On allocation failure the slot is left empty and `None` is returned;
    /// callers skip both rendering and compositing for the frame. The
    /// failure is logged once per requested size and the allocation is
    /// retried on the next call.
    pub fn ensure<H>(&mut self, host: &mut H, width: u32, height: u32) -> Option<&mut S>
    where
        H: OverlayHost<Surface = S>,
    {
        if self.surface.is_some() && self.width == width && self.height == height {
            return self.surface.as_mut();
        }
        match self.try_allocate(host, width, height) {
            Ok(()) => self.surface.as_mut(),
            Err(err) => {
                if self.reported_failure != Some((width, height)) {
                    log::warn!("[Offscreen] {err}");
                    self.reported_failure = Some((width, height));
                }
                None
            }
        }
    }

    /// Start-path variant of [`ensure`](OffscreenSlot::ensure): identical
    /// allocation behavior, but surfaces the failure as a typed error for
    /// the toggle command to return.
    pub fn allocate<H>(&mut self, host: &mut H, width: u32, height: u32) -> OverlayResult<()>
    where
        H: OverlayHost<Surface = S>,
    {
        if self.surface.is_some() && self.width == width && self.height == height {
            return Ok(());
        }
        self.try_allocate(host, width, height)
    }

    fn try_allocate<H>(&mut self, host: &mut H, width: u32, height: u32) -> OverlayResult<()>
    where
        H: OverlayHost<Surface = S>,
    {
        // A mismatched target is dropped before asking for the new one.
        self.reset();
        if width == 0 || height == 0 {
            return Err(OverlayError::InvalidTargetSize { width, height });
        }
        match host.create_offscreen(width, height) {
            Ok(surface) => {
                self.surface = Some(surface);
                self.width = width;
                self.height = height;
                self.reported_failure = None;
                Ok(())
            }
            Err(source) => Err(OverlayError::TargetAllocation {
                width,
                height,
                source,
            }),
        }
    }
}

impl<S> Default for OffscreenSlot<S> {
    fn default() -> Self {
        Self::new()
    }
}
