//! Orbit camera driven through the script contract

use approx::assert_relative_eq;

use crate::core::config::OrbitCameraConfig;
use crate::ecs::components::{CameraComponent, TransformComponent};
use crate::foundation::math::Vec3;
use crate::input::{InputManager, MouseButton};
use crate::scene::{OrbitCameraScript, Scene, SceneManager};

#[test]
fn test_orbit_script_drags_camera_around_target() {
    let target = Vec3::new(0.0, 1.0, 0.0);
    let mut manager = SceneManager::new();
    let scene = manager.register_scene(Scene::empty("pve_scene")).unwrap();

    let camera = scene.world_mut().create_entity();
    scene
        .world_mut()
        .insert_component(camera, TransformComponent::from_position(Vec3::new(4.0, 1.0, 0.0)))
        .unwrap();
    scene
        .world_mut()
        .insert_component(camera, CameraComponent::default().with_target(target))
        .unwrap();
    scene
        .attach_script(camera, OrbitCameraScript::new(&OrbitCameraConfig::default()))
        .unwrap();

    let mut input = InputManager::new();
    input.handle_mouse_move(200.0, 200.0);
    manager.update(&input, 0.016).unwrap();

    input.handle_mouse_button(MouseButton::Left, true);
    for step in 1..=30 {
        input.handle_mouse_move(200.0 + f64::from(step) * 20.0, 200.0);
        manager.update(&input, 0.016).unwrap();
    }

    let world = manager.get_scene("pve_scene").unwrap().world();
    let position = world.component::<TransformComponent>(camera).position;
    assert_relative_eq!((position - target).norm(), 4.0, epsilon = 1e-4);
    assert_relative_eq!(position.y, target.y, epsilon = 1e-4);
    assert!((position - Vec3::new(4.0, 1.0, 0.0)).norm() > 1.0);
}

#[test]
fn test_orbit_script_ignores_non_camera_entity() {
    let mut scene = Scene::empty("pve_scene");
    let id = scene.spawn_script(OrbitCameraScript::default());
    let entity = scene.script_entity(id).unwrap();
    scene
        .world_mut()
        .insert_component(entity, TransformComponent::from_position(Vec3::x()))
        .unwrap();

    scene.update(&InputManager::new(), 0.016).unwrap();
    assert_eq!(
        scene.world().component::<TransformComponent>(entity).position,
        Vec3::x()
    );
}
