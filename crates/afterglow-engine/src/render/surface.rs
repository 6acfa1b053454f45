use crate::coords::SurfaceSize;
use crate::device::SurfaceError;

use super::ctx::FrameEncoder;

/// Display surface the pipeline renders into.
///
/// Implemented by [`crate::device::Gpu`]. GPU submission stays behind this
/// seam: the pipeline decides *what* runs, the surface owns frame
/// acquisition, submission and presentation.
pub trait RenderSurface {
    /// Current drawable size in physical pixels.
    fn size(&self) -> SurfaceSize;

    /// Reconfigures the surface.
    ///
    /// A zero-area size is recorded but reported as
    /// [`SurfaceError::ZeroArea`]; the caller decides how to degrade.
    fn resize(&mut self, size: SurfaceSize) -> Result<(), SurfaceError>;

    /// Acquires a frame, lets `record` encode into it, then submits and
    /// presents it.
    fn present(
        &mut self,
        record: &mut dyn FnMut(&mut FrameEncoder<'_>),
    ) -> Result<(), SurfaceError>;
}

/// Outcome of one `RenderPipeline::execute`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// The chain ran and the frame was presented.
    Presented,
    /// Nothing was presented this tick; the previous image stays on screen.
    Skipped,
    /// The surface reported an unrecoverable error.
    Fatal,
}
