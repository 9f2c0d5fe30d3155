use std::f32::consts::PI;

use cgmath::{Deg, MetricSpace, Point3};
use facet_viewer::{
    camera::{OrbitCamera, OrbitController, Projection},
    config::CameraConfig,
};

fn setup() -> (OrbitCamera, OrbitController, Projection) {
    let camera = OrbitCamera::from_config(&CameraConfig::default());
    let controller = OrbitController::new(600);
    let projection = Projection::new(800, 600, Deg(75.0), 0.1, 1000.0);
    (camera, controller, projection)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} but got {}",
        expected,
        actual
    );
}

#[test]
fn should_start_at_configured_position() {
    let (camera, _, _) = setup();
    let position = camera.position();
    assert_close(position.x, 0.0);
    assert_close(position.y, 1.0);
    assert_close(position.z, 2.0);
    assert_eq!(camera.target, Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn should_keep_distance_while_rotating() {
    let (mut camera, mut controller, projection) = setup();
    let radius = camera.position().distance(camera.target);

    controller.handle_drag(120.0, -45.0);
    controller.update(&mut camera, &projection);
    assert_close(camera.position().distance(camera.target), radius);

    controller.handle_drag(-300.0, 80.0);
    controller.update(&mut camera, &projection);
    assert_close(camera.position().distance(camera.target), radius);
}

#[test]
fn should_turn_once_per_viewport_height() {
    let (mut camera, mut controller, projection) = setup();
    let theta = camera.theta;

    controller.handle_drag(600.0, 0.0);
    controller.update(&mut camera, &projection);
    assert_close(camera.theta, theta - 2.0 * PI);
}

#[test]
fn should_stay_away_from_the_poles() {
    let (mut camera, mut controller, projection) = setup();

    controller.handle_drag(0.0, 10_000.0);
    controller.update(&mut camera, &projection);
    assert!(camera.phi > 0.0 && camera.phi < PI);

    controller.handle_drag(0.0, -10_000.0);
    controller.update(&mut camera, &projection);
    assert!(camera.phi > 0.0 && camera.phi < PI);
}

#[test]
fn should_dolly_on_scroll() {
    let (mut camera, mut controller, projection) = setup();
    let radius = camera.radius;

    controller.handle_scroll(1.0);
    controller.update(&mut camera, &projection);
    assert_close(camera.radius, radius * 0.95);

    controller.handle_scroll(-2.0);
    controller.update(&mut camera, &projection);
    assert_close(camera.radius, radius * 0.95 / (0.95 * 0.95));
}

#[test]
fn should_move_target_when_panning() {
    let (mut camera, mut controller, projection) = setup();
    let radius = camera.radius;
    let offset = camera.position() - camera.target;

    controller.handle_pan(50.0, 20.0);
    controller.update(&mut camera, &projection);

    assert_ne!(camera.target, Point3::new(0.0, 0.0, 0.0));
    assert_close(camera.radius, radius);
    // Panning translates, the viewing direction stays the same
    let moved = camera.position() - camera.target;
    assert_close(moved.x, offset.x);
    assert_close(moved.y, offset.y);
    assert_close(moved.z, offset.z);
}

#[test]
fn should_reset_input_after_update() {
    let (mut camera, mut controller, projection) = setup();
    controller.handle_drag(100.0, 0.0);
    controller.update(&mut camera, &projection);
    let theta = camera.theta;

    controller.update(&mut camera, &projection);
    assert_close(camera.theta, theta);
}
