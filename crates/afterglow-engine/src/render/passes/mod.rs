//! Post-processing stages run by [`super::RenderPipeline`].

pub mod blur;
pub mod glow;
mod render;
mod shader;

pub use blur::{BlurAxis, BlurPass};
pub use glow::{GlowPass, GlowSettings};
pub use render::RenderPass;
pub use shader::ShaderPass;

use crate::coords::SurfaceSize;

use super::ctx::{FrameEncoder, PassIo};
use super::uniforms::{ParamError, ParamValue, Uniforms};

/// One GPU stage of the post-processing chain.
///
/// A pass owns its parameters. The key set is fixed when the pass is built;
/// writes only replace values of the declared kind.
pub trait Pass {
    /// Stable name, used in logs and errors.
    fn name(&self) -> &str;

    fn parameters(&self) -> &Uniforms;

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError>;

    /// Re-derives the enabled flag from the current parameters and returns it.
    /// Called by the pipeline at the start of every execute.
    fn refresh_enabled(&mut self) -> bool {
        self.is_enabled()
    }

    fn is_enabled(&self) -> bool;

    /// New drawable size. Passes with resolution-dependent parameters update
    /// them here.
    fn resize(&mut self, _size: SurfaceSize) {}

    /// Records this pass into the open frame, reading `io.input` and writing
    /// `io.output`.
    fn encode(&mut self, frame: &mut FrameEncoder<'_>, io: PassIo<'_>);
}
