//! Time subsystem.
//!
//! Frame timing without coupling to the runtime:
//! - one `FrameClock` per window
//! - `tick()` once per presented frame yields the `FrameTime` handed to
//!   every tick subscriber

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
