use glam::{Mat4, Vec3};

/// Right-handed, z-up perspective camera.
///
/// Projection depth range is `0..1`, as wgpu expects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, self.up)
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -10.0, 10.0),
            look_at: Vec3::ZERO,
            up: Vec3::Z,
            fov_y: 40f32.to_radians(),
            aspect: 1.0,
            near: 1.0,
            far: 80.0,
        }
    }
}
