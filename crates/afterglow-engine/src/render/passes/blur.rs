use glam::Vec2;

use crate::coords::SurfaceSize;
use crate::render::ctx::{FrameEncoder, PassIo};
use crate::render::program::BLUR_PROGRAM;
use crate::render::uniforms::{ParamError, ParamValue, TextureSource, Uniforms, INPUT_PARAM};

use super::shader::ShaderPass;
use super::Pass;

pub const RESOLUTION: &str = "resolution";
pub const STRENGTH: &str = "strength";

/// Direction a [`BlurPass`] blurs along.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlurAxis {
    Horizontal,
    Vertical,
}

impl BlurAxis {
    /// This axis' component of `v`.
    #[inline]
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            BlurAxis::Horizontal => v.x,
            BlurAxis::Vertical => v.y,
        }
    }

    /// A vector carrying `amount` on this axis and zero on the other.
    #[inline]
    pub fn along(self, amount: f32) -> Vec2 {
        match self {
            BlurAxis::Horizontal => Vec2::new(amount, 0.0),
            BlurAxis::Vertical => Vec2::new(0.0, amount),
        }
    }
}

/// One half of the separable blur.
///
/// Parameters: `input` (texture), `resolution` (drawable size in pixels),
/// `strength` (only the pass' own axis is ever nonzero). Enabled iff the
/// axis strength is positive.
pub struct BlurPass {
    axis: BlurAxis,
    shader: ShaderPass,
    enabled: bool,
}

impl BlurPass {
    pub fn new(axis: BlurAxis, strength: f32, size: SurfaceSize) -> Self {
        let name = match axis {
            BlurAxis::Horizontal => "blur_horizontal",
            BlurAxis::Vertical => "blur_vertical",
        };
        let uniforms = Uniforms::new()
            .with(INPUT_PARAM, ParamValue::Texture(TextureSource::Unbound))
            .with(RESOLUTION, ParamValue::Vec2(size.as_vec2()))
            .with(STRENGTH, ParamValue::Vec2(axis.along(strength)));

        Self {
            axis,
            shader: ShaderPass::new(name, &BLUR_PROGRAM, uniforms),
            enabled: strength > 0.0,
        }
    }

    pub fn horizontal(strength: f32, size: SurfaceSize) -> Self {
        Self::new(BlurAxis::Horizontal, strength, size)
    }

    pub fn vertical(strength: f32, size: SurfaceSize) -> Self {
        Self::new(BlurAxis::Vertical, strength, size)
    }

    pub fn axis(&self) -> BlurAxis {
        self.axis
    }

    /// Strength along this pass' axis.
    pub fn strength(&self) -> f32 {
        self.shader
            .uniforms()
            .get(STRENGTH)
            .and_then(|v| v.as_vec2())
            .map_or(0.0, |v| self.axis.component(v))
    }

    pub fn resolution(&self) -> Vec2 {
        self.shader
            .uniforms()
            .get(RESOLUTION)
            .and_then(|v| v.as_vec2())
            .unwrap_or(Vec2::ZERO)
    }
}

impl Pass for BlurPass {
    fn name(&self) -> &str {
        self.shader.name()
    }

    fn parameters(&self) -> &Uniforms {
        self.shader.uniforms()
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        // The off-axis component stays zero.
        let value = match (name, value) {
            (STRENGTH, ParamValue::Vec2(v)) => ParamValue::Vec2(self.axis.along(self.axis.component(v))),
            _ => value,
        };
        self.shader.set(name, value)
    }

    fn refresh_enabled(&mut self) -> bool {
        self.enabled = self.strength() > 0.0;
        self.enabled
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn resize(&mut self, size: SurfaceSize) {
        if let Err(err) = self.shader.set(RESOLUTION, ParamValue::Vec2(size.as_vec2())) {
            log::warn!("{}: {err}", self.shader.name());
        }
    }

    fn encode(&mut self, frame: &mut FrameEncoder<'_>, io: PassIo<'_>) {
        self.shader.encode(frame, io);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> SurfaceSize {
        SurfaceSize::new(800, 600)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn declares_fixed_parameter_set() {
        let pass = BlurPass::horizontal(1.0, size());
        let names: Vec<_> = pass.parameters().names().collect();
        assert_eq!(names, [INPUT_PARAM, RESOLUTION, STRENGTH]);
        assert_eq!(pass.resolution(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn strength_lives_on_own_axis() {
        let h = BlurPass::horizontal(1.0, size());
        let v = BlurPass::vertical(1.0, size());
        assert_eq!(h.parameters().get(STRENGTH), Some(ParamValue::Vec2(Vec2::new(1.0, 0.0))));
        assert_eq!(v.parameters().get(STRENGTH), Some(ParamValue::Vec2(Vec2::new(0.0, 1.0))));
    }

    #[test]
    fn off_axis_writes_are_dropped() {
        let mut v = BlurPass::vertical(1.0, size());
        v.set_parameter(STRENGTH, ParamValue::Vec2(Vec2::new(5.0, 2.0))).unwrap();
        assert_eq!(v.parameters().get(STRENGTH), Some(ParamValue::Vec2(Vec2::new(0.0, 2.0))));
    }

    // ── enabled ───────────────────────────────────────────────────────────

    #[test]
    fn enabled_follows_axis_strength() {
        let mut pass = BlurPass::horizontal(1.0, size());
        assert!(pass.refresh_enabled());

        pass.set_parameter(STRENGTH, ParamValue::Vec2(Vec2::ZERO)).unwrap();
        assert!(pass.is_enabled(), "stale until refreshed");
        assert!(!pass.refresh_enabled());

        pass.set_parameter(STRENGTH, ParamValue::Vec2(Vec2::new(0.001, 0.0))).unwrap();
        assert!(pass.refresh_enabled());
    }

    #[test]
    fn zero_default_strength_starts_disabled() {
        let pass = BlurPass::vertical(0.0, size());
        assert!(!pass.is_enabled());
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_resolution() {
        let mut pass = BlurPass::vertical(1.0, size());
        pass.resize(SurfaceSize::new(1024, 768));
        assert_eq!(pass.resolution(), Vec2::new(1024.0, 768.0));
    }
}
