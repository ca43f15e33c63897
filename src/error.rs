//! Central error types for periscope.
//!
//! Per-frame failures never surface as errors: controllers degrade to
//! skipped frames and report through the `log` facade. Only the explicit
//! toggle commands return these typed errors to the host.

use thiserror::Error;

/// Failure reported by a host's off-screen surface allocator.
///
/// Hosts construct this to describe why `create_offscreen` could not
/// produce a surface (resource exhaustion, unsupported size, lost context).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SurfaceError(String);

impl SurfaceError {
    pub fn new(reason: impl Into<String>) -> Self {
        SurfaceError(reason.into())
    }
}

impl From<String> for SurfaceError {
    fn from(reason: String) -> Self {
        SurfaceError(reason)
    }
}

impl From<&str> for SurfaceError {
    fn from(reason: &str) -> Self {
        SurfaceError(reason.to_string())
    }
}

/// Main error type for periscope operations.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Off-screen target allocation failed
    #[error("Offscreen target allocation failed at {width}x{height}: {source}")]
    TargetAllocation {
        width: u32,
        height: u32,
        #[source]
        source: SurfaceError,
    },

    /// Off-screen target was requested with unusable dimensions
    #[error("Offscreen target size {width}x{height} is not drawable")]
    InvalidTargetSize { width: u32, height: u32 },
}

/// Type alias for Results using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;
