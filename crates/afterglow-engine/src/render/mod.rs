//! GPU rendering: the post-processing pipeline, its passes and the scene
//! renderer behind the base pass.
//!
//! Convention:
//! - Passes write full-surface images; intermediate targets match the
//!   surface size and format.
//! - Everything GPU-facing happens inside [`RenderSurface::present`], so the
//!   scheduling logic runs (and is tested) without a device.

mod ctx;
pub mod passes;
mod pipeline;
mod program;
#[cfg(any(test, feature = "testing"))]
mod recording;
pub mod scene;
mod surface;
mod targets;
mod uniforms;

pub use ctx::{FrameEncoder, PassIo};
pub use passes::{BlurAxis, BlurPass, GlowPass, GlowSettings, Pass, RenderPass, ShaderPass};
pub use pipeline::{schedule, PassId, PassStep, RenderPipeline, StepInput, StepOutput};
pub use program::{Program, BLUR_PROGRAM, GLOW_PROGRAM, SCENE_PROGRAM};
#[cfg(any(test, feature = "testing"))]
pub use recording::RecordingSurface;
pub use scene::{Marker, MarkerId, Scene, SceneView};
pub use surface::{FrameStatus, RenderSurface};
pub use targets::RenderTargets;
pub use uniforms::{
    ParamError, ParamKind, ParamValue, TargetSlot, TextureSource, Uniforms, INPUT_PARAM,
};
