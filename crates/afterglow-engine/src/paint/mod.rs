//! Color model shared by scene content, clear colors and shader parameters.
//!
//! Colors are stored premultiplied; shader parameters take straight RGB.

pub mod color;

pub use color::{Color, ColorParseError};
