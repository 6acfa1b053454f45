//! Ordered pass chain with ping-pong intermediate targets.

use crate::coords::SurfaceSize;
use crate::device::SurfaceError;

use super::ctx::{FrameEncoder, PassIo};
use super::passes::Pass;
use super::scene::SceneView;
use super::surface::{FrameStatus, RenderSurface};
use super::targets::RenderTargets;
use super::uniforms::{ParamError, ParamValue, TargetSlot, TextureSource, INPUT_PARAM};

/// Handle to a pass inside a [`RenderPipeline`]. Indices are stable because
/// passes are never removed or reordered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PassId(usize);

impl PassId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a scheduled pass reads from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StepInput {
    /// First step: nothing upstream, the pass renders (or samples black).
    Scene,
    Target(TargetSlot),
}

/// Where a scheduled pass writes to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StepOutput {
    Target(TargetSlot),
    Surface,
}

/// One entry of a frame's execution plan.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PassStep {
    pub pass: PassId,
    pub input: StepInput,
    pub output: StepOutput,
}

/// Builds the execution plan for the given enabled mask.
///
/// Disabled passes are skipped and the running image flows through to the
/// next enabled pass. The last enabled pass writes to the surface; every
/// other step writes to the target its predecessor did not write.
pub fn schedule(enabled: &[bool]) -> Vec<PassStep> {
    let active: Vec<usize> = enabled
        .iter()
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect();

    let mut steps = Vec::with_capacity(active.len());
    let mut previous: Option<TargetSlot> = None;

    for (k, &index) in active.iter().enumerate() {
        let input = previous.map_or(StepInput::Scene, StepInput::Target);
        let output = if k + 1 == active.len() {
            StepOutput::Surface
        } else {
            let slot = previous.map_or(TargetSlot::A, TargetSlot::other);
            previous = Some(slot);
            StepOutput::Target(slot)
        };

        steps.push(PassStep {
            pass: PassId(index),
            input,
            output,
        });
    }

    steps
}

/// Fixed, ordered chain of passes composed into the display surface.
///
/// Execution order is insertion order. The pipeline owns its passes; other
/// components address them through [`PassId`] and write parameters through
/// [`RenderPipeline::set_parameter`].
pub struct RenderPipeline {
    passes: Vec<Box<dyn Pass>>,
    size: SurfaceSize,
    suspended: bool,
    targets: RenderTargets,
    last_schedule: Vec<PassStep>,
}

impl RenderPipeline {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            passes: Vec::new(),
            size,
            suspended: size.is_empty(),
            targets: RenderTargets::new(),
            last_schedule: Vec::new(),
        }
    }

    /// Appends a pass to the end of the chain.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) -> PassId {
        let id = PassId(self.passes.len());
        log::debug!("pipeline: pass #{} = {}", id.0, pass.name());
        self.passes.push(Box::new(pass));
        id
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn pass(&self, id: PassId) -> Option<&dyn Pass> {
        self.passes.get(id.0).map(|p| p.as_ref())
    }

    pub fn pass_ids(&self) -> impl Iterator<Item = PassId> {
        (0..self.passes.len()).map(PassId)
    }

    pub fn parameter(&self, id: PassId, name: &str) -> Option<ParamValue> {
        self.pass(id)?.parameters().get(name)
    }

    /// Writes one pass parameter. Visible on the next [`RenderPipeline::execute`].
    pub fn set_parameter(
        &mut self,
        id: PassId,
        name: &str,
        value: ParamValue,
    ) -> Result<(), ParamError> {
        self.passes
            .get_mut(id.0)
            .ok_or(ParamError::NoSuchPass(id.0))?
            .set_parameter(name, value)
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Plan used by the most recent execute that got past suspension.
    pub fn last_schedule(&self) -> &[PassStep] {
        &self.last_schedule
    }

    // ── resize ────────────────────────────────────────────────────────────

    /// Reconfigures the surface. A failed or zero-area resize suspends the
    /// pipeline; the next successful one resumes it. Returns whether the
    /// surface accepted the size.
    pub fn resize_surface(&mut self, surface: &mut dyn RenderSurface, size: SurfaceSize) -> bool {
        match surface.resize(size) {
            Ok(()) => {
                if self.suspended {
                    log::info!("render pipeline resumed at {}x{}", size.width, size.height);
                }
                self.suspended = false;
                self.size = size;
                true
            }
            Err(err) => {
                if !self.suspended {
                    log::warn!("render pipeline suspended: {err}");
                }
                self.suspended = true;
                false
            }
        }
    }

    /// Pushes a drawable size to every pass. Empty sizes are ignored so
    /// resolution parameters always describe a drawable surface.
    pub fn resize_passes(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        for pass in &mut self.passes {
            pass.resize(size);
        }
    }

    pub fn resize(&mut self, surface: &mut dyn RenderSurface, size: SurfaceSize) {
        self.resize_surface(surface, size);
        self.resize_passes(size);
    }

    // ── execute ───────────────────────────────────────────────────────────

    /// Runs the chain once and presents the result.
    pub fn execute(&mut self, surface: &mut dyn RenderSurface, view: &SceneView<'_>) -> FrameStatus {
        if self.suspended {
            log::debug!("frame skipped: pipeline suspended");
            return FrameStatus::Skipped;
        }

        let enabled: Vec<bool> = self.passes.iter_mut().map(|p| p.refresh_enabled()).collect();
        self.last_schedule = schedule(&enabled);
        if self.last_schedule.is_empty() {
            return FrameStatus::Skipped;
        }

        for step in &self.last_schedule {
            let source = match step.input {
                StepInput::Scene => TextureSource::Unbound,
                StepInput::Target(slot) => TextureSource::Target(slot),
            };
            let pass = &mut self.passes[step.pass.0];
            if pass.parameters().contains(INPUT_PARAM) {
                if let Err(err) = pass.set_parameter(INPUT_PARAM, ParamValue::Texture(source)) {
                    log::warn!("{}: {err}", pass.name());
                }
            }
        }

        let passes = &mut self.passes;
        let targets = &mut self.targets;
        let steps = &self.last_schedule;

        let result = surface.present(&mut |frame: &mut FrameEncoder<'_>| {
            targets.ensure(frame.device, frame.queue, frame.format, frame.size);
            let surface_view = frame.surface_view;
            let Some(fallback) = targets.fallback() else { return };

            for step in steps {
                let input = match step.input {
                    StepInput::Scene => Some(fallback),
                    StepInput::Target(slot) => targets.view(slot),
                };
                let output = match step.output {
                    StepOutput::Surface => Some(surface_view),
                    StepOutput::Target(slot) => targets.view(slot),
                };
                let (Some(input), Some(output)) = (input, output) else { return };

                passes[step.pass.0].encode(frame, PassIo { input, output, view });
            }
        });

        match result {
            Ok(()) => FrameStatus::Presented,
            Err(err) if err.is_fatal() => {
                log::error!("surface error: {err}");
                FrameStatus::Fatal
            }
            Err(err @ SurfaceError::ZeroArea { .. }) => {
                log::warn!("render pipeline suspended: {err}");
                self.suspended = true;
                FrameStatus::Skipped
            }
            Err(err) => {
                log::debug!("frame skipped: {err}");
                FrameStatus::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::paint::Color;
    use crate::render::passes::{BlurPass, GlowPass, RenderPass};
    use crate::render::scene::Scene;
    use crate::render::RecordingSurface;
    use glam::Vec2;

    struct Chain {
        pipeline: RenderPipeline,
        render: PassId,
        blur_h: PassId,
        blur_v: PassId,
        glow: PassId,
    }

    fn chain(size: SurfaceSize) -> Chain {
        let mut pipeline = RenderPipeline::new(size);
        let render = pipeline.add_pass(RenderPass::new());
        let blur_h = pipeline.add_pass(BlurPass::horizontal(1.0, size));
        let blur_v = pipeline.add_pass(BlurPass::vertical(1.0, size));
        let glow = pipeline.add_pass(GlowPass::default());
        Chain { pipeline, render, blur_h, blur_v, glow }
    }

    fn run(pipeline: &mut RenderPipeline, surface: &mut RecordingSurface) -> FrameStatus {
        let scene = Scene::new();
        let camera = Camera::default();
        pipeline.execute(surface, &SceneView { scene: &scene, camera: &camera })
    }

    fn order(pipeline: &RenderPipeline) -> Vec<PassId> {
        pipeline.last_schedule().iter().map(|s| s.pass).collect()
    }

    // ── schedule ──────────────────────────────────────────────────────────

    #[test]
    fn full_chain_ping_pongs() {
        use StepInput as I;
        use StepOutput as O;
        use TargetSlot::{A, B};

        let steps = schedule(&[true, true, true, true]);
        let io: Vec<_> = steps.iter().map(|s| (s.pass.0, s.input, s.output)).collect();
        assert_eq!(
            io,
            [
                (0, I::Scene, O::Target(A)),
                (1, I::Target(A), O::Target(B)),
                (2, I::Target(B), O::Target(A)),
                (3, I::Target(A), O::Surface),
            ]
        );
    }

    #[test]
    fn every_mask_keeps_order_and_chains_outputs() {
        for mask in 0u8..16 {
            let enabled: Vec<bool> = (0..4).map(|i| mask & (1 << i) != 0).collect();
            let steps = schedule(&enabled);

            let expected: Vec<usize> = (0..4).filter(|&i| enabled[i]).collect();
            let got: Vec<usize> = steps.iter().map(|s| s.pass.0).collect();
            assert_eq!(got, expected, "mask {mask:04b}");

            for (k, step) in steps.iter().enumerate() {
                if k == 0 {
                    assert_eq!(step.input, StepInput::Scene);
                } else {
                    let StepOutput::Target(prev) = steps[k - 1].output else {
                        panic!("only the last step may write the surface");
                    };
                    assert_eq!(step.input, StepInput::Target(prev));
                    assert_ne!(step.output, StepOutput::Target(prev));
                }
            }
            if let Some(last) = steps.last() {
                assert_eq!(last.output, StepOutput::Surface);
            }
        }
    }

    #[test]
    fn single_pass_writes_surface_directly() {
        let steps = schedule(&[true]);
        assert_eq!(steps[0].input, StepInput::Scene);
        assert_eq!(steps[0].output, StepOutput::Surface);
    }

    // ── execute ───────────────────────────────────────────────────────────

    #[test]
    fn execute_runs_enabled_passes_in_order() {
        let size = SurfaceSize::new(800, 600);
        let mut c = chain(size);
        let mut surface = RecordingSurface::new(size);

        assert_eq!(run(&mut c.pipeline, &mut surface), FrameStatus::Presented);
        assert_eq!(order(&c.pipeline), [c.render, c.blur_h, c.blur_v, c.glow]);
        assert_eq!(surface.presented(), 1);
    }

    #[test]
    fn execute_binds_previous_output_as_input() {
        let size = SurfaceSize::new(800, 600);
        let mut c = chain(size);
        let mut surface = RecordingSurface::new(size);

        c.pipeline
            .set_parameter(c.blur_h, "strength", ParamValue::Vec2(Vec2::ZERO))
            .unwrap();
        run(&mut c.pipeline, &mut surface);

        assert_eq!(order(&c.pipeline), [c.render, c.blur_v, c.glow]);
        assert_eq!(
            c.pipeline.parameter(c.blur_v, INPUT_PARAM),
            Some(ParamValue::Texture(TextureSource::Target(TargetSlot::A)))
        );
        assert_eq!(
            c.pipeline.parameter(c.glow, INPUT_PARAM),
            Some(ParamValue::Texture(TextureSource::Target(TargetSlot::B)))
        );
    }

    #[test]
    fn blur_toggle_is_evaluated_every_execute() {
        let size = SurfaceSize::new(800, 600);
        let mut c = chain(size);
        let mut surface = RecordingSurface::new(size);

        c.pipeline
            .set_parameter(c.blur_v, "strength", ParamValue::Vec2(Vec2::ZERO))
            .unwrap();
        run(&mut c.pipeline, &mut surface);
        assert!(!order(&c.pipeline).contains(&c.blur_v));

        c.pipeline
            .set_parameter(c.blur_v, "strength", ParamValue::Vec2(Vec2::new(0.0, 2.0)))
            .unwrap();
        run(&mut c.pipeline, &mut surface);
        assert!(order(&c.pipeline).contains(&c.blur_v));
    }

    #[test]
    fn glow_color_write_is_visible_to_next_execute() {
        let size = SurfaceSize::new(800, 600);
        let mut c = chain(size);
        let mut surface = RecordingSurface::new(size);

        let red = Color::from_srgb_u8(255, 0, 0).rgb();
        c.pipeline
            .set_parameter(c.glow, "color", ParamValue::Vec3(red))
            .unwrap();
        run(&mut c.pipeline, &mut surface);

        assert_eq!(c.pipeline.parameter(c.glow, "color"), Some(ParamValue::Vec3(red)));

        // GlowParams: position @0, radius @2, color @4..7, alpha @7.
        let packed = c.pipeline.pass(c.glow).unwrap().parameters().pack();
        let words: Vec<f32> = packed
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(words[4..7], red.to_array());
    }

    #[test]
    fn unknown_pass_is_an_error() {
        let mut pipeline = RenderPipeline::new(SurfaceSize::new(1, 1));
        assert_eq!(
            pipeline.set_parameter(PassId(3), "radius", ParamValue::Float(1.0)),
            Err(ParamError::NoSuchPass(3))
        );
    }

    #[test]
    fn empty_pipeline_skips() {
        let size = SurfaceSize::new(800, 600);
        let mut pipeline = RenderPipeline::new(size);
        let mut surface = RecordingSurface::new(size);
        assert_eq!(run(&mut pipeline, &mut surface), FrameStatus::Skipped);
        assert_eq!(surface.presented(), 0);
    }

    // ── resize / suspension ───────────────────────────────────────────────

    #[test]
    fn resize_updates_surface_and_blur_resolution() {
        let mut c = chain(SurfaceSize::new(800, 600));
        let mut surface = RecordingSurface::new(SurfaceSize::new(800, 600));

        let size = SurfaceSize::new(1280, 720);
        c.pipeline.resize(&mut surface, size);

        assert_eq!(surface.size(), size);
        for id in [c.blur_h, c.blur_v] {
            assert_eq!(
                c.pipeline.parameter(id, "resolution"),
                Some(ParamValue::Vec2(Vec2::new(1280.0, 720.0)))
            );
        }
    }

    #[test]
    fn zero_area_resize_suspends_until_valid_resize() {
        let mut c = chain(SurfaceSize::new(640, 480));
        let mut surface = RecordingSurface::new(SurfaceSize::new(640, 480));

        c.pipeline.resize(&mut surface, SurfaceSize::new(0, 0));
        assert!(c.pipeline.is_suspended());
        assert_eq!(run(&mut c.pipeline, &mut surface), FrameStatus::Skipped);
        assert_eq!(surface.presented(), 0);
        assert_eq!(
            c.pipeline.parameter(c.blur_h, "resolution"),
            Some(ParamValue::Vec2(Vec2::new(640.0, 480.0)))
        );

        c.pipeline.resize(&mut surface, SurfaceSize::new(800, 600));
        assert!(!c.pipeline.is_suspended());
        assert_eq!(run(&mut c.pipeline, &mut surface), FrameStatus::Presented);
        assert_eq!(
            c.pipeline.parameter(c.blur_h, "resolution"),
            Some(ParamValue::Vec2(Vec2::new(800.0, 600.0)))
        );
    }

    #[test]
    fn pipeline_built_at_zero_size_starts_suspended() {
        let pipeline = RenderPipeline::new(SurfaceSize::new(0, 0));
        assert!(pipeline.is_suspended());
    }

    #[test]
    fn transient_failure_skips_one_frame() {
        let size = SurfaceSize::new(800, 600);
        let mut c = chain(size);
        let mut surface = RecordingSurface::new(size);

        surface.fail_next_present(SurfaceError::Transient);
        assert_eq!(run(&mut c.pipeline, &mut surface), FrameStatus::Skipped);
        assert!(!c.pipeline.is_suspended());
        assert_eq!(run(&mut c.pipeline, &mut surface), FrameStatus::Presented);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        let size = SurfaceSize::new(800, 600);
        let mut c = chain(size);
        let mut surface = RecordingSurface::new(size);

        surface.fail_next_present(SurfaceError::OutOfMemory);
        assert_eq!(run(&mut c.pipeline, &mut surface), FrameStatus::Fatal);
    }
}
