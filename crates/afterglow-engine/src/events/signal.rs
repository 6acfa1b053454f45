/// Handle returned by [`Signal::subscribe`]; pass it to
/// [`Signal::unsubscribe`] to remove the handler.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

struct Slot<H: ?Sized> {
    id: SubscriptionId,
    handler: Box<H>,
}

/// Typed publisher.
///
/// `H` is the handler's trait-object type, e.g.
/// `dyn FnMut(&mut Stage, &FrameTime)`. Handlers run synchronously, in
/// registration order, on the emitting thread.
pub struct Signal<H: ?Sized> {
    slots: Vec<Slot<H>>,
    next_id: u64,
}

impl<H: ?Sized> Signal<H> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a handler. It runs after every handler registered before it.
    pub fn subscribe(&mut self, handler: Box<H>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot { id, handler });
        id
    }

    /// Removes a handler. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Invokes `call` once per handler, in registration order.
    pub fn emit_with(&mut self, mut call: impl FnMut(&mut H)) {
        for slot in &mut self.slots {
            call(&mut *slot.handler);
        }
    }
}

impl<H: ?Sized> Default for Signal<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> std::fmt::Debug for Signal<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Handler = dyn FnMut(&mut Vec<&'static str>, u32);

    fn push(tag: &'static str) -> Box<Handler> {
        Box::new(move |log: &mut Vec<&'static str>, _: u32| log.push(tag))
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let mut signal: Signal<Handler> = Signal::new();
        signal.subscribe(push("first"));
        signal.subscribe(push("second"));
        signal.subscribe(push("third"));

        let mut log = Vec::new();
        signal.emit_with(|h| h(&mut log, 0));
        assert_eq!(log, ["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_handler() {
        let mut signal: Signal<Handler> = Signal::new();
        signal.subscribe(push("a"));
        let b = signal.subscribe(push("b"));
        signal.subscribe(push("c"));

        assert!(signal.unsubscribe(b));
        assert!(!signal.unsubscribe(b));
        assert_eq!(signal.len(), 2);

        let mut log = Vec::new();
        signal.emit_with(|h| h(&mut log, 0));
        assert_eq!(log, ["a", "c"]);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut signal: Signal<Handler> = Signal::new();
        let a = signal.subscribe(push("noop"));
        signal.unsubscribe(a);
        let b = signal.subscribe(push("noop"));
        assert_ne!(a, b);
    }

    #[test]
    fn payload_reaches_every_handler() {
        let mut signal: Signal<dyn FnMut(&mut u32, u32)> = Signal::new();
        signal.subscribe(Box::new(|sum: &mut u32, v: u32| *sum += v));
        signal.subscribe(Box::new(|sum: &mut u32, v: u32| *sum += v * 10));

        let mut sum = 0;
        signal.emit_with(|h| h(&mut sum, 2));
        assert_eq!(sum, 22);
    }
}
