//! Ground-plane scene content drawn by the base render pass.

mod renderer;

pub use renderer::SceneRenderer;

use glam::Vec3;

use crate::camera::Camera;
use crate::paint::Color;

/// Stable handle to a marker inside a [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MarkerId(usize);

/// Flat disc lying on the `z = position.z` plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub position: Vec3,
    pub radius: f32,
    pub color: Color,
}

/// Scene content. Markers draw in insertion order; later ones paint over
/// earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    markers: Vec<Marker>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, marker: Marker) -> MarkerId {
        self.markers.push(marker);
        MarkerId(self.markers.len() - 1)
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn get_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(id.0)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// What the base pass renders this frame: the scene seen through a camera.
#[derive(Debug, Copy, Clone)]
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_address_markers_in_insertion_order() {
        let mut scene = Scene::new();
        let a = scene.add(Marker {
            position: Vec3::ZERO,
            radius: 1.0,
            color: Color::black(),
        });
        let b = scene.add(Marker {
            position: Vec3::X,
            radius: 0.5,
            color: Color::black(),
        });

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(a).map(|m| m.radius), Some(1.0));

        if let Some(m) = scene.get_mut(b) {
            m.position = Vec3::Y;
        }
        assert_eq!(scene.markers()[1].position, Vec3::Y);
    }
}
