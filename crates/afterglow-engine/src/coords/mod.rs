//! Coordinate and size types shared by the device, camera and render layers.
//!
//! Vector math uses `glam`; this module only adds the surface-size type that
//! bridges winit's physical sizes and shader-facing resolution uniforms.

mod size;

pub use size::SurfaceSize;
