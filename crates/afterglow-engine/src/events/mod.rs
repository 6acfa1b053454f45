//! Synchronous publishers for frame ticks and viewport changes.
//!
//! Handlers are plain closures taking the application context explicitly, so
//! subscribers never need shared ownership of the components they drive.

mod signal;
mod time_source;
mod viewport;

pub use signal::{Signal, SubscriptionId};
pub use time_source::{TickHandler, TimeSource};
pub use viewport::{ResizeHandler, ViewportSizeTracker};
