//! Demo content: a floor of markers and a vehicle driving a loop.

use std::f32::consts::TAU;

use afterglow_engine::config::Config;
use afterglow_engine::paint::Color;
use afterglow_engine::render::{Marker, MarkerId, Scene};
use afterglow_engine::time::FrameTime;
use glam::{Vec2, Vec3};

const LOOP_RADIUS: f32 = 8.0;
/// Angular speed along the loop, radians per second.
const LOOP_SPEED: f32 = 0.35;
/// The vehicle appears after this many seconds, standing in for asset loading.
const SPAWN_DELAY: f32 = 0.5;

const FLOOR_RINGS: [(f32, usize); 3] = [(4.0, 12), (8.0, 24), (12.0, 36)];

/// Vehicle look, picked by the launch content variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VehicleStyle {
    Classic,
    Cybertruck,
}

impl VehicleStyle {
    pub fn for_config(config: &Config) -> Self {
        if config.content_variant {
            VehicleStyle::Cybertruck
        } else {
            VehicleStyle::Classic
        }
    }

    fn body(self) -> (f32, Color) {
        match self {
            VehicleStyle::Classic => (0.9, Color::from_srgb_u8(0xff, 0x4f, 0x4f)),
            VehicleStyle::Cybertruck => (1.2, Color::from_srgb_u8(0xc6, 0xcb, 0xd1)),
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Vehicle {
    body: MarkerId,
    light: MarkerId,
}

/// Scene content owned by the application.
#[derive(Debug)]
pub struct World {
    style: VehicleStyle,
    vehicle: Option<Vehicle>,
    elapsed: f32,
    angle: f32,
}

impl World {
    /// Builds the floor into `scene`. The vehicle spawns on a later tick.
    pub fn new(config: &Config, scene: &mut Scene) -> Self {
        let floor = Color::from_srgb_u8(0x2a, 0x1d, 0x33);
        let accent = Color::from_srgb_u8(0x4a, 0x2c, 0x52);

        scene.add(Marker {
            position: Vec3::ZERO,
            radius: 2.0,
            color: accent,
        });
        for (ring, count) in FLOOR_RINGS {
            for i in 0..count {
                let a = TAU * i as f32 / count as f32;
                scene.add(Marker {
                    position: Vec3::new(ring * a.cos(), ring * a.sin(), 0.0),
                    radius: 0.35,
                    color: floor,
                });
            }
        }

        Self {
            style: VehicleStyle::for_config(config),
            vehicle: None,
            elapsed: 0.0,
            angle: 0.0,
        }
    }

    pub fn style(&self) -> VehicleStyle {
        self.style
    }

    /// Ground position of the tracked vehicle, `None` until it has spawned.
    pub fn tracked_position(&self, scene: &Scene) -> Option<Vec2> {
        let vehicle = self.vehicle?;
        scene.get(vehicle.body).map(|m| m.position.truncate())
    }

    pub fn on_tick(&mut self, time: &FrameTime, scene: &mut Scene) {
        self.elapsed += time.dt;

        let Some(vehicle) = self.vehicle else {
            if self.elapsed >= SPAWN_DELAY {
                self.spawn(scene);
            }
            return;
        };

        self.angle = (self.angle + LOOP_SPEED * time.dt) % TAU;
        let (position, heading) = loop_pose(self.angle);

        if let Some(body) = scene.get_mut(vehicle.body) {
            body.position = position.extend(0.05);
        }
        if let Some(light) = scene.get_mut(vehicle.light) {
            light.position = (position + heading * 0.9).extend(0.06);
        }
    }

    fn spawn(&mut self, scene: &mut Scene) {
        let (radius, color) = self.style.body();
        let (position, heading) = loop_pose(self.angle);

        let body = scene.add(Marker {
            position: position.extend(0.05),
            radius,
            color,
        });
        let light = scene.add(Marker {
            position: (position + heading * 0.9).extend(0.06),
            radius: 0.25,
            color: Color::from_srgb_u8(0xff, 0xf4, 0xd6),
        });

        log::info!("world: {:?} vehicle spawned", self.style);
        self.vehicle = Some(Vehicle { body, light });
    }
}

/// Position and unit heading on the loop at `angle`.
fn loop_pose(angle: f32) -> (Vec2, Vec2) {
    let position = Vec2::new(angle.cos(), angle.sin()) * LOOP_RADIUS;
    let heading = Vec2::new(-angle.sin(), angle.cos());
    (position, heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(i: u64) -> FrameTime {
        FrameTime::fixed(1.0 / 60.0, i)
    }

    #[test]
    fn vehicle_is_not_ready_before_spawn_delay() {
        let mut scene = Scene::new();
        let mut world = World::new(&Config::default(), &mut scene);
        let floor = scene.len();

        world.on_tick(&frame(0), &mut scene);
        assert!(world.tracked_position(&scene).is_none());
        assert_eq!(scene.len(), floor);

        for i in 1..40 {
            world.on_tick(&frame(i), &mut scene);
        }
        assert!(world.tracked_position(&scene).is_some());
        assert_eq!(scene.len(), floor + 2);
    }

    #[test]
    fn vehicle_drives_the_loop() {
        let mut scene = Scene::new();
        let mut world = World::new(&Config::default(), &mut scene);
        for i in 0..60 {
            world.on_tick(&frame(i), &mut scene);
        }
        let a = world.tracked_position(&scene).unwrap();
        for i in 60..120 {
            world.on_tick(&frame(i), &mut scene);
        }
        let b = world.tracked_position(&scene).unwrap();

        assert!((a.length() - LOOP_RADIUS).abs() < 1e-3);
        assert!((b.length() - LOOP_RADIUS).abs() < 1e-3);
        assert!(a.distance(b) > 0.1);
    }

    #[test]
    fn content_variant_picks_vehicle_style() {
        let mut scene = Scene::new();
        let config = Config {
            content_variant: true,
            ..Config::default()
        };
        assert_eq!(World::new(&config, &mut scene).style(), VehicleStyle::Cybertruck);
        assert_eq!(
            World::new(&Config::default(), &mut scene).style(),
            VehicleStyle::Classic
        );
    }
}
