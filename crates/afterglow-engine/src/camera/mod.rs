//! Perspective camera and the rig that keeps it aimed at a tracked entity.

mod camera;
mod rig;

pub use camera::Camera;
pub use rig::{CameraRig, CameraSettings};
