use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::coords::SurfaceSize;
use crate::input::InputEvent;
use crate::render::RenderSurface;

use super::ctx::{FrameCtx, SurfaceCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Callback order per window: `on_surface_ready` once, then any number of
/// `on_resize` / `on_input` / `on_window_event` / `on_frame`. Resize callbacks
/// always complete before the next `on_frame`.
pub trait App {
    /// Called once after the window and its GPU surface exist.
    fn on_surface_ready(&mut self, ctx: &mut SurfaceCtx<'_, '_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called when the drawable size changes. The default only reconfigures
    /// the surface.
    fn on_resize(&mut self, ctx: &mut SurfaceCtx<'_, '_>, size: SurfaceSize) {
        if let Err(err) = ctx.surface().resize(size) {
            log::debug!("surface resize deferred: {err}");
        }
    }

    /// Called for translated input events.
    fn on_input(&mut self, window_id: WindowId, event: &InputEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called for raw window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
