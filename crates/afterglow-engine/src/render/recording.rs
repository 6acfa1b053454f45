//! GPU-free [`RenderSurface`] for tests.

use crate::coords::SurfaceSize;
use crate::device::SurfaceError;

use super::ctx::FrameEncoder;
use super::surface::RenderSurface;

/// Surface double that records resizes and presents without touching a GPU.
///
/// `present` never invokes the record callback; schedule-level assertions go
/// through `RenderPipeline::last_schedule`.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    resizes: Vec<SurfaceSize>,
    presented: usize,
    fail_next_present: Option<SurfaceError>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn resizes(&self) -> &[SurfaceSize] {
        &self.resizes
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Makes the next `present` fail with `err`.
    pub fn fail_next_present(&mut self, err: SurfaceError) {
        self.fail_next_present = Some(err);
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), SurfaceError> {
        self.size = size;
        self.resizes.push(size);
        if size.is_empty() {
            return Err(SurfaceError::ZeroArea {
                width: size.width,
                height: size.height,
            });
        }
        Ok(())
    }

    fn present(
        &mut self,
        _record: &mut dyn FnMut(&mut FrameEncoder<'_>),
    ) -> Result<(), SurfaceError> {
        if let Some(err) = self.fail_next_present.take() {
            return Err(err);
        }
        self.presented += 1;
        Ok(())
    }
}
