use crate::coords::SurfaceSize;
use crate::render::RenderSurface;

use super::signal::{Signal, SubscriptionId};

/// Resize handler: receives the application context `C`, the display
/// surface and the new size.
pub type ResizeHandler<C> = dyn FnMut(&mut C, &mut dyn RenderSurface, SurfaceSize);

/// Tracks the display surface size and publishes changes.
///
/// `current()` is updated before subscribers run, so every handler observes
/// the new size through either its argument or the tracker.
pub struct ViewportSizeTracker<C> {
    signal: Signal<ResizeHandler<C>>,
    current: SurfaceSize,
}

impl<C> ViewportSizeTracker<C> {
    pub fn new(initial: SurfaceSize) -> Self {
        Self {
            signal: Signal::new(),
            current: initial,
        }
    }

    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&mut C, &mut dyn RenderSurface, SurfaceSize) + 'static,
    ) -> SubscriptionId {
        self.signal.subscribe(Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.signal.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.signal.len()
    }

    pub fn current(&self) -> SurfaceSize {
        self.current
    }

    /// Records the initial size without notifying anyone.
    pub fn set_initial(&mut self, size: SurfaceSize) {
        self.current = size;
    }

    /// Records `size` and runs every resize handler.
    pub fn notify(&mut self, ctx: &mut C, surface: &mut dyn RenderSurface, size: SurfaceSize) {
        self.current = size;
        log::debug!("viewport resized to {}x{}", size.width, size.height);
        self.signal
            .emit_with(|handler| handler(&mut *ctx, &mut *surface, size));
    }
}
