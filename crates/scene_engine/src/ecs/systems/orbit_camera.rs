//! Orbiting camera controller
//!
//! Turns left-button mouse drags into rotation around the camera's target. The
//! controller keeps the orbit in spherical coordinates between frames and writes
//! the resulting cartesian position into the entity's transform every frame.

use crate::core::config::OrbitCameraConfig;
use crate::ecs::components::{CameraComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::{Spherical, Vec3};
use crate::input::{InputManager, MouseButton};

/// Per-camera orbit state
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    sensitivity: f32,
    polar_limit: f32,
    /// Cursor position seen last frame; `None` until the first update
    last_mouse: Option<(f32, f32)>,
    /// Current orbit; `None` until derived from the transform
    orbit: Option<Spherical>,
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(&OrbitCameraConfig::default())
    }
}

impl OrbitCameraController {
    /// Create a controller with the configured sensitivity and polar limit
    pub fn new(config: &OrbitCameraConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
            polar_limit: config.polar_limit.abs(),
            last_mouse: None,
            orbit: None,
        }
    }

    /// Current orbit, once initialized
    pub fn orbit(&self) -> Option<Spherical> {
        self.orbit
    }

    /// Forget the orbit and cursor history; the next update re-derives both
    pub fn reset(&mut self) {
        self.last_mouse = None;
        self.orbit = None;
    }

    /// Apply a cursor delta (pixels) over `delta_time` seconds to an orbit
    pub fn rotate(&self, orbit: &mut Spherical, dx: f32, dy: f32, delta_time: f32) {
        orbit.azimuth += dx * delta_time * self.sensitivity;
        orbit.polar =
            (orbit.polar + dy * delta_time * self.sensitivity).clamp(-self.polar_limit, self.polar_limit);
    }

    /// Run one frame for `entity`.
    ///
    /// Does nothing for entities without a camera. Returns true when the transform
    /// position was written.
    pub fn update(
        &mut self,
        world: &mut World,
        entity: Entity,
        input: &InputManager,
        delta_time: f32,
    ) -> bool {
        let Some(target) = world
            .get_component::<CameraComponent>(entity)
            .map(|camera| camera.target)
        else {
            return false;
        };

        let mouse = input.mouse_coords();
        let written = self.step(world, entity, target, input, mouse, delta_time);
        // Recorded every frame so a drag delta only spans consecutive frames
        self.last_mouse = Some(mouse);
        written
    }

    fn step(
        &mut self,
        world: &mut World,
        entity: Entity,
        target: Vec3,
        input: &InputManager,
        mouse: (f32, f32),
        delta_time: f32,
    ) -> bool {
        let Some(transform) = world.get_component_mut::<TransformComponent>(entity) else {
            log::warn!("Orbit camera {:?} has no transform, skipping", entity);
            return false;
        };

        let mut orbit = match self.orbit {
            Some(orbit) => orbit,
            None => match Spherical::from_cartesian(transform.position - target) {
                Some(orbit) => orbit,
                None => {
                    log::warn!(
                        "Orbit camera {:?} sits on its target, orbit undefined until it moves",
                        entity
                    );
                    return false;
                }
            },
        };

        if input.is_mouse_button_down(MouseButton::Left) {
            if let Some((last_x, last_y)) = self.last_mouse {
                if (last_x, last_y) != mouse {
                    self.rotate(&mut orbit, mouse.0 - last_x, mouse.1 - last_y, delta_time);
                }
            }
        }

        transform.position = target + orbit.to_cartesian();
        self.orbit = Some(orbit);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn camera_world(position: Vec3, target: Vec3) -> (World, Entity) {
        let mut world = World::new();
        let entity = world.create_entity();
        world
            .insert_component(entity, TransformComponent::from_position(position))
            .unwrap();
        world
            .insert_component(entity, CameraComponent::default().with_target(target))
            .unwrap();
        (world, entity)
    }

    #[test]
    fn test_round_trip_over_full_sweep() {
        let target = Vec3::new(1.0, -2.0, 0.5);
        let elevation = 0.4_f32;
        let radius = 5.0_f32;
        let steps = 64;
        for step in 0..steps {
            let azimuth = 2.0 * PI * step as f32 / steps as f32;
            let offset = Spherical::new(radius, azimuth, elevation).to_cartesian();
            let position = target + offset;

            let orbit = Spherical::from_cartesian(position - target).unwrap();
            assert_relative_eq!(orbit.to_cartesian(), offset, epsilon = 1e-4);

            // The controller writes back the same position when not dragging
            let (mut world, entity) = camera_world(position, target);
            let mut controller = OrbitCameraController::default();
            assert!(controller.update(&mut world, entity, &InputManager::new(), 0.016));
            let written = world.component::<TransformComponent>(entity).position;
            assert_relative_eq!(written, position, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_polar_clamped_under_large_drags() {
        let (mut world, entity) = camera_world(Vec3::new(0.0, 0.0, 4.0), Vec3::zeros());
        let mut controller = OrbitCameraController::default();
        let mut input = InputManager::new();
        input.handle_mouse_button(MouseButton::Left, true);

        let dt = 0.016;
        for frame in 0..200 {
            // +1000 px per frame straight down the screen
            input.handle_mouse_move(0.0, f64::from(frame) * 1000.0);
            controller.update(&mut world, entity, &input, dt);
            let polar = controller.orbit().unwrap().polar;
            assert!((-1.5..=1.5).contains(&polar), "polar {polar} escaped clamp");
        }
        assert_relative_eq!(controller.orbit().unwrap().polar, 1.5);
    }

    #[test]
    fn test_rotate_clamps_both_directions() {
        let controller = OrbitCameraController::default();
        let mut orbit = Spherical::new(1.0, 0.0, 0.0);
        for _ in 0..100 {
            controller.rotate(&mut orbit, 0.0, -1000.0, 0.016);
        }
        assert_relative_eq!(orbit.polar, -1.5);
    }

    #[test]
    fn test_drag_rotates_azimuth() {
        let (mut world, entity) = camera_world(Vec3::new(3.0, 0.0, 0.0), Vec3::zeros());
        let mut controller = OrbitCameraController::default();
        let mut input = InputManager::new();

        input.handle_mouse_move(100.0, 100.0);
        controller.update(&mut world, entity, &input, 0.1);
        let start = controller.orbit().unwrap().azimuth;

        input.handle_mouse_button(MouseButton::Left, true);
        input.handle_mouse_move(110.0, 100.0);
        controller.update(&mut world, entity, &input, 0.1);

        let expected = start + 10.0 * 0.1 * OrbitCameraConfig::default().sensitivity;
        assert_relative_eq!(controller.orbit().unwrap().azimuth, expected, epsilon = 1e-6);
        let position = world.component::<TransformComponent>(entity).position;
        assert_relative_eq!(position.norm(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_movement_without_button_is_ignored() {
        let (mut world, entity) = camera_world(Vec3::new(0.0, 1.0, 2.0), Vec3::zeros());
        let mut controller = OrbitCameraController::default();
        let mut input = InputManager::new();

        controller.update(&mut world, entity, &input, 0.016);
        let before = controller.orbit().unwrap();

        input.handle_mouse_move(500.0, 500.0);
        controller.update(&mut world, entity, &input, 0.016);
        assert_eq!(controller.orbit().unwrap(), before);

        // Pressing after the cursor moved measures from the latest position only
        input.handle_mouse_button(MouseButton::Left, true);
        controller.update(&mut world, entity, &input, 0.016);
        assert_eq!(controller.orbit().unwrap(), before);
    }

    #[test]
    fn test_non_camera_entity_is_noop() {
        let mut world = World::new();
        let entity = world.create_entity();
        world
            .insert_component(entity, TransformComponent::from_position(Vec3::x()))
            .unwrap();
        let mut controller = OrbitCameraController::default();
        assert!(!controller.update(&mut world, entity, &InputManager::new(), 0.016));
        assert_eq!(world.component::<TransformComponent>(entity).position, Vec3::x());
        assert!(controller.orbit().is_none());
    }

    #[test]
    fn test_camera_on_target_does_not_produce_nan() {
        let (mut world, entity) = camera_world(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
        let mut controller = OrbitCameraController::default();
        assert!(!controller.update(&mut world, entity, &InputManager::new(), 0.016));
        let position = world.component::<TransformComponent>(entity).position;
        assert!(position.iter().all(|v| v.is_finite()));

        // Once moved off the target the orbit initializes
        world.component_mut::<TransformComponent>(entity).position = Vec3::new(1.0, 1.0, 3.0);
        assert!(controller.update(&mut world, entity, &InputManager::new(), 0.016));
        assert_relative_eq!(controller.orbit().unwrap().radius, 2.0, epsilon = 1e-6);
    }
}
