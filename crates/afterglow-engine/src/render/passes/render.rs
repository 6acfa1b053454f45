use crate::paint::Color;
use crate::render::ctx::{FrameEncoder, PassIo};
use crate::render::scene::SceneRenderer;
use crate::render::uniforms::{ParamError, ParamValue, Uniforms};

use super::Pass;

/// Base pass: draws the scene through the camera. Ignores its input.
pub struct RenderPass {
    clear_color: Color,
    parameters: Uniforms,
    renderer: SceneRenderer,
}

impl RenderPass {
    pub fn new() -> Self {
        Self {
            clear_color: Color::black(),
            parameters: Uniforms::new(),
            renderer: SceneRenderer::new(),
        }
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }
}

impl Default for RenderPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RenderPass {
    fn name(&self) -> &str {
        "render"
    }

    fn parameters(&self) -> &Uniforms {
        &self.parameters
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        self.parameters.set("render", name, value)
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn encode(&mut self, frame: &mut FrameEncoder<'_>, io: PassIo<'_>) {
        self.renderer
            .render(frame, io.output, io.view, self.clear_color);
    }
}
