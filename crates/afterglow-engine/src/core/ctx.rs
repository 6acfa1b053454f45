use winit::window::{Window, WindowId};

use crate::coords::SurfaceSize;
use crate::device::Gpu;
use crate::input::InputState;
use crate::render::RenderSurface;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Drawable size in physical pixels.
    pub fn physical_size(&self) -> SurfaceSize {
        SurfaceSize::from(self.window.inner_size())
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }
}

/// Context for surface lifecycle callbacks (creation, resize).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct SurfaceCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
}

impl SurfaceCtx<'_, '_> {
    /// The GPU surface behind the render-pipeline seam.
    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        &mut *self.gpu
    }
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        &mut *self.gpu
    }
}
