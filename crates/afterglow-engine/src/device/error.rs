/// High-level response after a wgpu surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Display-surface failure as seen by the render pipeline.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface cannot be configured at this size (minimized window,
    /// layout transition).
    #[error("surface has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    /// The swapchain was lost or outdated and has been reconfigured.
    #[error("surface was lost and has been reconfigured")]
    Reconfigured,

    /// Frame acquisition timed out or failed transiently.
    #[error("surface frame acquisition failed transiently")]
    Transient,

    /// The device ran out of memory. Not recoverable.
    #[error("GPU out of memory")]
    OutOfMemory,
}

impl SurfaceError {
    /// Only out-of-memory ends the loop; everything else skips a frame.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SurfaceError::OutOfMemory)
    }
}

impl From<SurfaceErrorAction> for SurfaceError {
    fn from(action: SurfaceErrorAction) -> Self {
        match action {
            SurfaceErrorAction::Reconfigured => SurfaceError::Reconfigured,
            SurfaceErrorAction::SkipFrame => SurfaceError::Transient,
            SurfaceErrorAction::Fatal => SurfaceError::OutOfMemory,
        }
    }
}
