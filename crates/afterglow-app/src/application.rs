//! Top-level orchestrator.
//!
//! `Application` builds every component in dependency order and wires the
//! tick and resize subscriptions once. Per-frame work lives in the
//! components; this module only connects them.

use afterglow_engine::camera::{CameraRig, CameraSettings};
use afterglow_engine::config::Config;
use afterglow_engine::coords::SurfaceSize;
use afterglow_engine::core::{App, AppControl, FrameCtx, SurfaceCtx};
use afterglow_engine::debug::{self, Component, DebugPanel, ParamTarget, SliderRange};
use afterglow_engine::events::{TimeSource, ViewportSizeTracker};
use afterglow_engine::input::{InputEvent, InputState, Key, KeyState};
use afterglow_engine::render::passes::{blur, glow};
use afterglow_engine::render::{
    BlurPass, FrameStatus, GlowPass, GlowSettings, PassId, RenderPass, RenderPipeline,
    RenderSurface, Scene, SceneView,
};
use afterglow_engine::time::FrameTime;
use winit::window::WindowId;

use crate::world::World;

/// Zoom change per wheel line.
const ZOOM_PER_LINE: f32 = 0.1;
/// Zoom change per second while `-` / `=` is held.
const ZOOM_KEY_RATE: f32 = 0.6;

const BLUR_RANGE: SliderRange = SliderRange::new(0.0, 10.0, 0.001);
const GLOW_POSITION_RANGE: SliderRange = SliderRange::new(-1.0, 2.0, 0.001);
const GLOW_RADIUS_RANGE: SliderRange = SliderRange::new(0.0, 2.0, 0.001);
const GLOW_ALPHA_RANGE: SliderRange = SliderRange::new(0.0, 1.0, 0.001);

/// Handles of the post-processing chain, in execution order.
#[derive(Debug, Copy, Clone)]
pub struct PostPasses {
    pub render: PassId,
    pub blur_h: PassId,
    pub blur_v: PassId,
    pub glow: PassId,
}

/// Builds `[Render, BlurH, BlurV, Glow]` and registers its debug bindings.
pub fn build_post_chain(
    config: &Config,
    size: SurfaceSize,
    debug: &mut dyn DebugPanel,
) -> (RenderPipeline, PostPasses) {
    let strength = config.default_blur_strength();

    let mut pipeline = RenderPipeline::new(size);
    let passes = PostPasses {
        render: pipeline.add_pass(RenderPass::new()),
        blur_h: pipeline.add_pass(BlurPass::horizontal(strength, size)),
        blur_v: pipeline.add_pass(BlurPass::vertical(strength, size)),
        glow: pipeline.add_pass(GlowPass::new(GlowSettings::default())),
    };

    let folder = debug.add_folder("postprocess/blur");
    debug.bind(
        folder,
        "strength.x",
        ParamTarget::new(passes.blur_h, blur::STRENGTH, Component::X),
        BLUR_RANGE,
    );
    debug.bind(
        folder,
        "strength.y",
        ParamTarget::new(passes.blur_v, blur::STRENGTH, Component::Y),
        BLUR_RANGE,
    );

    let folder = debug.add_folder("postprocess/glows");
    debug.bind(
        folder,
        "positionX",
        ParamTarget::new(passes.glow, glow::POSITION, Component::X),
        GLOW_POSITION_RANGE,
    );
    debug.bind(
        folder,
        "positionY",
        ParamTarget::new(passes.glow, glow::POSITION, Component::Y),
        GLOW_POSITION_RANGE,
    );
    debug.bind(
        folder,
        "radius",
        ParamTarget::new(passes.glow, glow::RADIUS, Component::Value),
        GLOW_RADIUS_RANGE,
    );
    debug.bind_color(folder, "color", passes.glow, glow::COLOR);
    debug.bind(
        folder,
        "alpha",
        ParamTarget::new(passes.glow, glow::ALPHA, Component::Value),
        GLOW_ALPHA_RANGE,
    );

    (pipeline, passes)
}

/// Everything the tick and resize handlers operate on.
pub struct Stage {
    rig: CameraRig,
    pipeline: RenderPipeline,
    passes: PostPasses,
    debug: Box<dyn DebugPanel>,
    scene: Scene,
    world: World,
    last_status: FrameStatus,
}

impl Stage {
    fn new(config: &Config, size: SurfaceSize) -> Self {
        let rig = CameraRig::new(CameraSettings::default(), size);

        let mut debug = debug::panel_for(config);
        let (pipeline, passes) = build_post_chain(config, size, debug.as_mut());

        let mut scene = Scene::new();
        let world = World::new(config, &mut scene);
        log::info!("world: {:?} vehicle, {} floor markers", world.style(), scene.len());

        Self {
            rig,
            pipeline,
            passes,
            debug,
            scene,
            world,
            last_status: FrameStatus::Skipped,
        }
    }

    fn on_tick_camera(&mut self, time: &FrameTime) {
        let tracked = self.world.tracked_position(&self.scene);
        self.rig.on_tick(time, tracked);
    }

    fn on_tick_render(&mut self, surface: &mut dyn RenderSurface) {
        let view = SceneView {
            scene: &self.scene,
            camera: self.rig.camera(),
        };
        self.last_status = self.pipeline.execute(surface, &view);
    }
}

pub struct Application {
    config: Config,
    time: TimeSource<Stage>,
    viewport: ViewportSizeTracker<Stage>,
    stage: Option<Stage>,
}

impl Application {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            time: TimeSource::new(),
            viewport: ViewportSizeTracker::new(SurfaceSize::default()),
            stage: None,
        }
    }

    /// Builds the stage against `surface` and wires the subscriptions.
    ///
    /// Tick order: camera, pipeline, world. Resize order: surface, camera,
    /// pass resolutions.
    pub fn attach(&mut self, surface: &mut dyn RenderSurface) {
        let size = surface.size();
        self.viewport.set_initial(size);
        self.stage = Some(Stage::new(&self.config, size));

        self.time.subscribe(|stage, _, time| stage.on_tick_camera(time));
        self.time.subscribe(|stage, surface, _| stage.on_tick_render(surface));
        self.time
            .subscribe(|stage, _, time| stage.world.on_tick(time, &mut stage.scene));

        self.viewport.subscribe(|stage, surface, size| {
            stage.pipeline.resize_surface(surface, size);
        });
        self.viewport
            .subscribe(|stage, _, size| stage.rig.on_resize(size));
        self.viewport
            .subscribe(|stage, _, size| stage.pipeline.resize_passes(size));

        log::info!(
            "application attached at {}x{} ({} passes)",
            size.width,
            size.height,
            self.stage.as_ref().map_or(0, |s| s.pipeline.len())
        );
    }

    /// Runs one frame. Returns `Skipped` until attached.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface, time: FrameTime) -> FrameStatus {
        let Some(stage) = self.stage.as_mut() else {
            return FrameStatus::Skipped;
        };
        self.time.tick(stage, surface, time);
        stage.last_status
    }

    pub fn resize(&mut self, surface: &mut dyn RenderSurface, size: SurfaceSize) {
        match self.stage.as_mut() {
            Some(stage) => self.viewport.notify(stage, surface, size),
            None => {
                if let Err(err) = surface.resize(size) {
                    log::debug!("surface resize before attach failed: {err}");
                }
            }
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> AppControl {
        let Some(stage) = self.stage.as_mut() else {
            return AppControl::Continue;
        };

        match *event {
            InputEvent::MouseWheel { delta, .. } => {
                stage.rig.zoom_by(-delta.vertical_lines() * ZOOM_PER_LINE);
            }
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                modifiers,
                ..
            } => {
                if stage.debug.handle_key(key, modifiers, &mut stage.pipeline) {
                    return AppControl::Continue;
                }
                if key == Key::Escape {
                    return AppControl::Exit;
                }
            }
            _ => {}
        }
        AppControl::Continue
    }

    /// Continuous zoom from held `-` / `=` keys.
    pub fn apply_held_keys(&mut self, input: &InputState, dt: f32) {
        let Some(stage) = self.stage.as_mut() else {
            return;
        };

        let mut delta = 0.0;
        if input.key_down(Key::Minus) {
            delta += ZOOM_KEY_RATE * dt;
        }
        if input.key_down(Key::Equal) {
            delta -= ZOOM_KEY_RATE * dt;
        }
        if delta != 0.0 {
            stage.rig.zoom_by(delta);
        }
    }
}

impl App for Application {
    fn on_surface_ready(&mut self, ctx: &mut SurfaceCtx<'_, '_>) -> AppControl {
        self.attach(ctx.surface());
        AppControl::Continue
    }

    fn on_resize(&mut self, ctx: &mut SurfaceCtx<'_, '_>, size: SurfaceSize) {
        self.resize(ctx.surface(), size);
    }

    fn on_input(&mut self, _window_id: WindowId, event: &InputEvent) -> AppControl {
        self.handle_input(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let time = ctx.time;
        self.apply_held_keys(ctx.input, time.dt);
        match self.tick(ctx.surface(), time) {
            FrameStatus::Fatal => {
                log::error!("surface lost beyond recovery, exiting");
                AppControl::Exit
            }
            FrameStatus::Presented | FrameStatus::Skipped => AppControl::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afterglow_engine::device::SurfaceError;
    use afterglow_engine::input::{Modifiers, MouseWheelDelta};
    use afterglow_engine::render::{ParamValue, RecordingSurface};
    use glam::{Vec2, Vec3};

    struct Harness {
        app: Application,
        surface: RecordingSurface,
        frame: u64,
    }

    impl Harness {
        fn new(config: Config) -> Self {
            let mut surface = RecordingSurface::new(SurfaceSize::new(1280, 720));
            let mut app = Application::new(config);
            app.attach(&mut surface);
            Self {
                app,
                surface,
                frame: 0,
            }
        }

        fn tick(&mut self) -> FrameStatus {
            let time = FrameTime::fixed(1.0 / 60.0, self.frame);
            self.frame += 1;
            self.app.tick(&mut self.surface, time)
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.app
                .resize(&mut self.surface, SurfaceSize::new(width, height));
        }

        fn stage(&self) -> &Stage {
            self.app.stage.as_ref().unwrap()
        }

        fn stage_mut(&mut self) -> &mut Stage {
            self.app.stage.as_mut().unwrap()
        }

        fn param(&self, pass: PassId, name: &str) -> ParamValue {
            self.stage().pipeline.parameter(pass, name).unwrap()
        }

        fn executed(&self) -> Vec<PassId> {
            self.stage()
                .pipeline
                .last_schedule()
                .iter()
                .map(|step| step.pass)
                .collect()
        }
    }

    // ── wiring ────────────────────────────────────────────────────────────

    #[test]
    fn attach_subscribes_ticks_and_resizes() {
        let h = Harness::new(Config::default());
        assert_eq!(h.app.time.subscriber_count(), 3);
        assert_eq!(h.app.viewport.subscriber_count(), 3);
        assert_eq!(h.app.viewport.current(), SurfaceSize::new(1280, 720));
        assert_eq!(h.stage().pipeline.len(), 4);
    }

    #[test]
    fn tick_before_attach_is_skipped() {
        let mut app = Application::new(Config::default());
        let mut surface = RecordingSurface::new(SurfaceSize::new(640, 480));
        assert_eq!(
            app.tick(&mut surface, FrameTime::fixed(1.0 / 60.0, 0)),
            FrameStatus::Skipped
        );
        assert_eq!(surface.presented(), 0);
    }

    #[test]
    fn tick_presents_full_chain_in_order() {
        let mut h = Harness::new(Config::default());
        assert_eq!(h.tick(), FrameStatus::Presented);

        let p = h.stage().passes;
        assert_eq!(h.executed(), [p.render, p.blur_h, p.blur_v, p.glow]);
        assert_eq!(h.surface.presented(), 1);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_reaches_surface_camera_and_blur() {
        let mut h = Harness::new(Config::default());
        h.resize(1024, 768);

        let p = h.stage().passes;
        let expected = ParamValue::Vec2(Vec2::new(1024.0, 768.0));
        assert_eq!(h.param(p.blur_h, blur::RESOLUTION), expected);
        assert_eq!(h.param(p.blur_v, blur::RESOLUTION), expected);
        assert_eq!(h.surface.size(), SurfaceSize::new(1024, 768));
        assert!((h.stage().rig.camera().aspect - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn zero_resize_skips_then_recovers() {
        let mut h = Harness::new(Config::default());
        h.resize(0, 0);
        assert_eq!(h.tick(), FrameStatus::Skipped);
        assert_eq!(h.surface.presented(), 0);

        h.resize(800, 600);
        assert_eq!(h.tick(), FrameStatus::Presented);

        let p = h.stage().passes;
        let expected = ParamValue::Vec2(Vec2::new(800.0, 600.0));
        assert_eq!(h.param(p.blur_h, blur::RESOLUTION), expected);
        assert_eq!(h.param(p.blur_v, blur::RESOLUTION), expected);
    }

    // ── pass parameters ───────────────────────────────────────────────────

    #[test]
    fn zero_strength_drops_blur_on_next_tick() {
        let mut h = Harness::new(Config::default());
        let p = h.stage().passes;

        h.stage_mut()
            .pipeline
            .set_parameter(p.blur_h, blur::STRENGTH, ParamValue::Vec2(Vec2::ZERO))
            .unwrap();
        h.tick();
        assert_eq!(h.executed(), [p.render, p.blur_v, p.glow]);

        h.stage_mut()
            .pipeline
            .set_parameter(p.blur_h, blur::STRENGTH, ParamValue::Vec2(Vec2::new(2.0, 0.0)))
            .unwrap();
        h.tick();
        assert_eq!(h.executed(), [p.render, p.blur_h, p.blur_v, p.glow]);
    }

    #[test]
    fn touch_mode_starts_without_blur() {
        let mut h = Harness::new(Config {
            touch: true,
            ..Config::default()
        });
        h.tick();
        let p = h.stage().passes;
        assert_eq!(h.executed(), [p.render, p.glow]);
    }

    #[test]
    fn glow_color_change_is_live() {
        let mut h = Harness::new(Config::default());
        let p = h.stage().passes;
        let red = ParamValue::Vec3(Vec3::new(1.0, 0.0, 0.0));

        h.stage_mut()
            .pipeline
            .set_parameter(p.glow, glow::COLOR, red)
            .unwrap();
        assert_eq!(h.tick(), FrameStatus::Presented);
        assert_eq!(h.param(p.glow, glow::COLOR), red);

        let packed = h.stage().pipeline.pass(p.glow).unwrap().parameters().pack();
        let words: Vec<f32> = packed
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(words[4..7], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        let mut h = Harness::new(Config::default());
        h.surface.fail_next_present(SurfaceError::OutOfMemory);
        assert_eq!(h.tick(), FrameStatus::Fatal);
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn camera_holds_target_until_vehicle_spawns() {
        let mut h = Harness::new(Config::default());
        for _ in 0..10 {
            h.tick();
        }
        let stage = h.stage();
        assert!(stage.world.tracked_position(&stage.scene).is_none());
        assert_eq!(h.stage().rig.target(), Vec2::ZERO);

        for _ in 0..60 {
            h.tick();
        }
        let stage = h.stage();
        let vehicle = stage.world.tracked_position(&stage.scene).unwrap();
        assert_ne!(stage.rig.target(), Vec2::ZERO);
        assert!(stage.rig.target().distance(vehicle) < 0.1);
    }

    #[test]
    fn wheel_and_keys_zoom() {
        let mut h = Harness::new(Config::default());
        let start = h.stage().rig.zoom();

        h.app.handle_input(&InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 },
            modifiers: Modifiers::default(),
        });
        for _ in 0..120 {
            h.tick();
        }
        let zoomed_in = h.stage().rig.zoom();
        assert!(zoomed_in < start);

        let mut input = InputState::default();
        input.apply_event(&InputEvent::key_pressed(Key::Minus, Modifiers::default()));
        for _ in 0..120 {
            h.app.apply_held_keys(&input, 1.0 / 60.0);
            h.tick();
        }
        assert!(h.stage().rig.zoom() > zoomed_in);
    }

    #[test]
    fn released_or_unfocused_keys_stop_zooming() {
        let mut h = Harness::new(Config::default());
        let mut input = InputState::default();
        input.apply_event(&InputEvent::key_pressed(Key::Equal, Modifiers::default()));
        h.app.apply_held_keys(&input, 0.5);

        input.apply_event(&InputEvent::Focused(false));
        for _ in 0..240 {
            h.app.apply_held_keys(&input, 1.0 / 60.0);
            h.tick();
        }
        // Half a second held moves the goal from 0.5 to 0.2, then nothing.
        assert!((h.stage().rig.zoom() - 0.2).abs() < 1e-2);
    }

    #[test]
    fn escape_exits() {
        let mut h = Harness::new(Config::default());
        let control = h
            .app
            .handle_input(&InputEvent::key_pressed(Key::Escape, Modifiers::default()));
        assert_eq!(control, AppControl::Exit);
    }

    // ── debug panel ───────────────────────────────────────────────────────

    #[test]
    fn debug_panel_edits_blur_strength() {
        let mut h = Harness::new(Config {
            debug: true,
            ..Config::default()
        });
        let p = h.stage().passes;

        h.app
            .handle_input(&InputEvent::key_pressed(Key::ArrowUp, Modifiers::SHIFT));
        let strength = h.param(p.blur_h, blur::STRENGTH).as_vec2().unwrap();
        assert!((strength.x - 1.1).abs() < 1e-4);
    }

    #[test]
    fn debug_panel_edits_glow_color_channel() {
        let mut h = Harness::new(Config {
            debug: true,
            ..Config::default()
        });
        let p = h.stage().passes;

        // strength.x, strength.y, positionX, positionY, radius, color
        for _ in 0..5 {
            h.app
                .handle_input(&InputEvent::key_pressed(Key::Tab, Modifiers::default()));
        }
        h.app
            .handle_input(&InputEvent::key_pressed(Key::ArrowDown, Modifiers::SHIFT));

        let rgb = h.param(p.glow, glow::COLOR).as_vec3().unwrap();
        assert!(rgb.x < 1.0);
        assert!((rgb.y - 207.0 / 255.0).abs() < 1e-6);
        assert!((rgb.z - 224.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn without_debug_keys_leave_parameters_alone() {
        let mut h = Harness::new(Config::default());
        let p = h.stage().passes;

        h.app
            .handle_input(&InputEvent::key_pressed(Key::ArrowUp, Modifiers::SHIFT));
        assert_eq!(
            h.param(p.blur_h, blur::STRENGTH),
            ParamValue::Vec2(Vec2::new(1.0, 0.0))
        );
    }
}
