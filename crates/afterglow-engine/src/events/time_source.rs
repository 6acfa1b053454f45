use crate::render::RenderSurface;
use crate::time::FrameTime;

use super::signal::{Signal, SubscriptionId};

/// Tick handler: receives the application context `C`, the display surface
/// and the frame time.
pub type TickHandler<C> = dyn FnMut(&mut C, &mut dyn RenderSurface, &FrameTime);

/// Per-frame tick publisher.
///
/// The runtime calls [`TimeSource::tick`] once per redraw; every subscriber
/// runs to completion, in registration order, before `tick` returns.
pub struct TimeSource<C> {
    signal: Signal<TickHandler<C>>,
    last: Option<FrameTime>,
}

impl<C> TimeSource<C> {
    pub fn new() -> Self {
        Self {
            signal: Signal::new(),
            last: None,
        }
    }

    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&mut C, &mut dyn RenderSurface, &FrameTime) + 'static,
    ) -> SubscriptionId {
        self.signal.subscribe(Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.signal.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.signal.len()
    }

    /// Most recent tick, if any.
    pub fn last(&self) -> Option<FrameTime> {
        self.last
    }

    /// Delivers one tick to every subscriber.
    pub fn tick(&mut self, ctx: &mut C, surface: &mut dyn RenderSurface, time: FrameTime) {
        self.last = Some(time);
        self.signal
            .emit_with(|handler| handler(&mut *ctx, &mut *surface, &time));
    }
}

impl<C> Default for TimeSource<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    #[test]
    fn ticks_reach_subscribers_in_order() {
        let mut time: TimeSource<Vec<(u64, &'static str)>> = TimeSource::new();
        time.subscribe(|log, _, t| log.push((t.frame_index, "camera")));
        time.subscribe(|log, _, t| log.push((t.frame_index, "pipeline")));

        let mut log = Vec::new();
        let mut surface = RecordingSurface::default();
        time.tick(&mut log, &mut surface, FrameTime::fixed(0.016, 0));
        time.tick(&mut log, &mut surface, FrameTime::fixed(0.016, 1));

        assert_eq!(
            log,
            [(0, "camera"), (0, "pipeline"), (1, "camera"), (1, "pipeline")]
        );
        assert_eq!(time.last().map(|t| t.frame_index), Some(1));
    }

    #[test]
    fn unsubscribed_handler_stops_receiving() {
        let mut time: TimeSource<u32> = TimeSource::new();
        let id = time.subscribe(|count, _, _| *count += 1);

        let mut count = 0;
        let mut surface = RecordingSurface::default();
        time.tick(&mut count, &mut surface, FrameTime::fixed(0.016, 0));
        assert!(time.unsubscribe(id));
        time.tick(&mut count, &mut surface, FrameTime::fixed(0.016, 1));

        assert_eq!(count, 1);
        assert_eq!(time.subscriber_count(), 0);
    }
}
