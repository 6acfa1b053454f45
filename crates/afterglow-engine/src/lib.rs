//! Afterglow engine crate.
//!
//! Platform + GPU runtime, the per-frame publishers, the follow camera and
//! the post-processing pipeline used by the `afterglow` binary.

pub mod config;
pub mod core;
pub mod device;
pub mod events;
pub mod input;
pub mod time;
pub mod window;

pub mod camera;
pub mod coords;
pub mod debug;
pub mod logging;
pub mod paint;
pub mod render;
