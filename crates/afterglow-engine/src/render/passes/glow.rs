use glam::Vec2;

use crate::paint::Color;
use crate::render::ctx::{FrameEncoder, PassIo};
use crate::render::program::GLOW_PROGRAM;
use crate::render::uniforms::{ParamError, ParamValue, TextureSource, Uniforms, INPUT_PARAM};

use super::shader::ShaderPass;
use super::Pass;

pub const POSITION: &str = "position";
pub const RADIUS: &str = "radius";
pub const COLOR: &str = "color";
pub const ALPHA: &str = "alpha";

/// Initial glow parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlowSettings {
    /// Normalized screen position, origin bottom-left.
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, 0.25),
            radius: 0.7,
            color: Color::from_srgb_u8(0xff, 0xcf, 0xe0),
            alpha: 0.55,
        }
    }
}

/// Radial color glow blended over the incoming image. Always enabled.
pub struct GlowPass {
    shader: ShaderPass,
}

impl GlowPass {
    pub fn new(settings: GlowSettings) -> Self {
        let uniforms = Uniforms::new()
            .with(INPUT_PARAM, ParamValue::Texture(TextureSource::Unbound))
            .with(POSITION, ParamValue::Vec2(settings.position))
            .with(RADIUS, ParamValue::Float(settings.radius.max(0.0)))
            .with(COLOR, ParamValue::Vec3(settings.color.rgb()))
            .with(ALPHA, ParamValue::Float(settings.alpha.clamp(0.0, 1.0)));

        Self {
            shader: ShaderPass::new("glow", &GLOW_PROGRAM, uniforms),
        }
    }

    pub fn color(&self) -> Color {
        self.shader
            .uniforms()
            .get(COLOR)
            .and_then(|v| v.as_vec3())
            .map_or(Color::black(), Color::from_rgb)
    }

    pub fn set_color(&mut self, color: Color) {
        if let Err(err) = self.shader.set(COLOR, ParamValue::Vec3(color.rgb())) {
            log::warn!("glow: {err}");
        }
    }
}

impl Default for GlowPass {
    fn default() -> Self {
        Self::new(GlowSettings::default())
    }
}

impl Pass for GlowPass {
    fn name(&self) -> &str {
        self.shader.name()
    }

    fn parameters(&self) -> &Uniforms {
        self.shader.uniforms()
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        let value = match (name, value) {
            (ALPHA, ParamValue::Float(a)) => ParamValue::Float(a.clamp(0.0, 1.0)),
            (RADIUS, ParamValue::Float(r)) => ParamValue::Float(r.max(0.0)),
            _ => value,
        };
        self.shader.set(name, value)
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn encode(&mut self, frame: &mut FrameEncoder<'_>, io: PassIo<'_>) {
        self.shader.encode(frame, io);
    }
}
