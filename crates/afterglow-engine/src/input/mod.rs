//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! [`translate`] turns window-system events into [`InputEvent`]s.

mod state;
pub(crate) mod translate;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseWheelDelta};
