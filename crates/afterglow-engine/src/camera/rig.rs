use glam::{Vec2, Vec3};

use crate::coords::SurfaceSize;
use crate::time::FrameTime;

use super::camera::Camera;

/// Frame rate the easing factors are expressed at.
const REFERENCE_FPS: f32 = 60.0;

/// Tuning for [`CameraRig`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Per-reference-frame fraction of the remaining distance covered by the
    /// eased target. In `(0, 1]`.
    pub easing: f32,
    /// Direction from the target to the eye; scaled by the follow distance.
    pub angle: Vec3,
    pub zoom_easing: f32,
    pub initial_zoom: f32,
    /// Follow distance at zoom `0`.
    pub base_distance: f32,
    /// Extra follow distance at zoom `1`.
    pub zoom_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_deg: 40.0,
            near: 1.0,
            far: 80.0,
            easing: 0.15,
            angle: Vec3::new(1.135, -1.45, 1.15),
            zoom_easing: 0.1,
            initial_zoom: 0.5,
            base_distance: 14.0,
            zoom_distance: 15.0,
        }
    }
}

/// Camera plus a 2D follow target on the ground plane.
///
/// `target` is where the camera wants to look; `eased_target` trails it with
/// frame-rate independent exponential easing and is what the camera actually
/// aims at. Both only ever move toward their goal, so the follow converges
/// without overshoot.
#[derive(Debug, Clone)]
pub struct CameraRig {
    settings: CameraSettings,
    camera: Camera,
    target: Vec2,
    eased_target: Vec2,
    zoom: f32,
    zoom_target: f32,
}

impl CameraRig {
    pub fn new(settings: CameraSettings, size: SurfaceSize) -> Self {
        let zoom = settings.initial_zoom.clamp(0.0, 1.0);
        let camera = Camera {
            fov_y: settings.fov_deg.to_radians(),
            aspect: size.aspect(),
            near: settings.near,
            far: settings.far,
            ..Camera::default()
        };

        let mut rig = Self {
            settings,
            camera,
            target: Vec2::ZERO,
            eased_target: Vec2::ZERO,
            zoom,
            zoom_target: zoom,
        };
        rig.aim();
        rig
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn eased_target(&self) -> Vec2 {
        self.eased_target
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Moves the zoom goal by `delta`, clamped to `[0, 1]`.
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom_target = (self.zoom_target + delta).clamp(0.0, 1.0);
    }

    /// Per-tick update. `tracked` is the followed entity's ground position,
    /// or `None` while it is not ready; the target is then left unchanged.
    pub fn on_tick(&mut self, time: &FrameTime, tracked: Option<Vec2>) {
        if let Some(position) = tracked {
            self.target = position;
        }

        let dt = time.dt;
        let follow = ease_factor(self.settings.easing, dt);
        self.eased_target += (self.target - self.eased_target) * follow;

        let zoom = ease_factor(self.settings.zoom_easing, dt);
        self.zoom += (self.zoom_target - self.zoom) * zoom;

        self.aim();
    }

    /// Keeps the projection aspect in sync with the drawable.
    pub fn on_resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        self.camera.aspect = size.aspect();
    }

    fn aim(&mut self) {
        let distance = self.settings.base_distance + self.settings.zoom_distance * self.zoom;
        let look_at = self.eased_target.extend(0.0);

        self.camera.look_at = look_at;
        self.camera.eye = look_at + self.settings.angle.normalize_or_zero() * distance;
        self.camera.up = Vec3::Z;
    }
}

/// Converts a per-reference-frame easing fraction into the fraction for a
/// step of `dt` seconds. Always in `[0, 1]`.
fn ease_factor(easing: f32, dt: f32) -> f32 {
    let easing = easing.clamp(0.0, 1.0);
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - easing).powf(dt * REFERENCE_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(CameraSettings::default(), SurfaceSize::new(800, 600))
    }

    fn frame(i: u64) -> FrameTime {
        FrameTime::fixed(1.0 / 60.0, i)
    }

    // ── follow ────────────────────────────────────────────────────────────

    #[test]
    fn converges_on_tracked_position_without_overshoot() {
        let mut rig = rig();
        let goal = Vec2::new(10.0, -4.0);

        let mut last = rig.eased_target().distance(goal);
        for i in 0..600 {
            rig.on_tick(&frame(i), Some(goal));
            let d = rig.eased_target().distance(goal);
            assert!(d <= last + 1e-5);
            assert!(rig.eased_target().x <= goal.x + 1e-5);
            last = d;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn missing_entity_keeps_target() {
        let mut rig = rig();
        rig.on_tick(&frame(0), Some(Vec2::new(3.0, 2.0)));
        for i in 1..20 {
            rig.on_tick(&frame(i), None);
            assert_eq!(rig.target(), Vec2::new(3.0, 2.0));
        }
    }

    #[test]
    fn easing_is_frame_rate_independent() {
        let goal = Some(Vec2::new(5.0, 0.0));

        let mut fast = rig();
        for i in 0..4 {
            fast.on_tick(&FrameTime::fixed(0.008_333, i), goal);
        }
        let mut slow = rig();
        slow.on_tick(&FrameTime::fixed(0.033_332, 0), goal);

        assert!((fast.eased_target().x - slow.eased_target().x).abs() < 1e-3);
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut rig = rig();
        rig.on_tick(&FrameTime::fixed(0.0, 0), Some(Vec2::ONE));
        assert_eq!(rig.eased_target(), Vec2::ZERO);
        assert_eq!(rig.target(), Vec2::ONE);
    }

    // ── aim / zoom / resize ───────────────────────────────────────────────

    #[test]
    fn camera_looks_at_eased_target_from_angle() {
        let mut rig = rig();
        rig.on_tick(&frame(0), Some(Vec2::new(2.0, 1.0)));

        let cam = rig.camera();
        assert_eq!(cam.look_at, rig.eased_target().extend(0.0));
        let distance = cam.eye.distance(cam.look_at);
        assert!((distance - (14.0 + 15.0 * 0.5)).abs() < 1e-4);
        assert!(cam.eye.z > 0.0);
    }

    #[test]
    fn zoom_is_clamped_and_eased() {
        let mut rig = rig();
        rig.zoom_by(10.0);
        rig.on_tick(&frame(0), None);
        assert!(rig.zoom() > 0.5 && rig.zoom() < 1.0);
        for i in 1..600 {
            rig.on_tick(&frame(i), None);
        }
        assert!((rig.zoom() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_empty() {
        let mut rig = rig();
        rig.on_resize(SurfaceSize::new(1920, 1080));
        assert!((rig.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
        rig.on_resize(SurfaceSize::new(0, 0));
        assert!((rig.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
