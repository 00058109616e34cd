use meshcheck_camera::{Camera, CameraController, DEFAULT_DAMPING, ELEVATION_LIMIT, pos2};
use meshcheck_geometry::Angle;

const EPS: f64 = 1.0e-9;

#[test]
fn update_without_drag_is_a_no_op() {
    let controller = CameraController::default();
    let mut camera = Camera::default();
    let before = camera;
    assert!(!controller.update_drag(&mut camera, pos2(300.0, 200.0)));
    assert_eq!(camera, before);
}

#[test]
fn horizontal_drag_turns_azimuth_against_pointer() {
    let mut controller = CameraController::default();
    let mut camera = Camera::default();
    controller.start_drag(&camera, pos2(100.0, 100.0));
    assert!(controller.update_drag(&mut camera, pos2(120.0, 100.0)));

    assert!((camera.azimuth().degrees() + 10.0).abs() < EPS);
    assert!(camera.elevation().degrees().abs() < EPS);
}

#[test]
fn vertical_drag_raises_elevation() {
    let mut controller = CameraController::default();
    let mut camera = Camera::default();
    controller.start_drag(&camera, pos2(100.0, 100.0));
    controller.update_drag(&mut camera, pos2(100.0, 140.0));

    assert!((camera.elevation().degrees() - 20.0).abs() < EPS);
    assert!(camera.azimuth().degrees().abs() < EPS);
}

#[test]
fn result_depends_only_on_total_offset() {
    let start = pos2(10.0, 10.0);
    let end = pos2(50.0, 30.0);

    let mut direct = Camera::default();
    let mut controller = CameraController::default();
    controller.start_drag(&direct, start);
    controller.update_drag(&mut direct, end);

    let mut wandering = Camera::default();
    let mut controller = CameraController::default();
    controller.start_drag(&wandering, start);
    for pos in [pos2(5.0, 5.0), pos2(400.0, -300.0), pos2(-80.0, 900.0), end] {
        controller.update_drag(&mut wandering, pos);
    }

    assert_eq!(direct.azimuth(), wandering.azimuth());
    assert_eq!(direct.elevation(), wandering.elevation());
}

#[test]
fn drag_is_relative_to_starting_orientation() {
    let mut camera = Camera::default();
    camera.set_orbit(Angle::from_degrees(45.0), Angle::from_degrees(-10.0));

    let mut controller = CameraController::default();
    controller.start_drag(&camera, pos2(0.0, 0.0));
    controller.update_drag(&mut camera, pos2(-30.0, 10.0));

    assert!((camera.azimuth().degrees() - 60.0).abs() < EPS);
    assert!((camera.elevation().degrees() + 5.0).abs() < EPS);
}

#[test]
fn long_drag_is_clamped_at_the_pole() {
    let mut controller = CameraController::default();
    let mut camera = Camera::default();
    controller.start_drag(&camera, pos2(0.0, 0.0));
    controller.update_drag(&mut camera, pos2(0.0, 10_000.0));
    assert_eq!(camera.elevation(), ELEVATION_LIMIT);

    controller.update_drag(&mut camera, pos2(0.0, -10_000.0));
    assert_eq!(camera.elevation(), -ELEVATION_LIMIT);
}

#[test]
fn end_drag_discards_the_snapshot() {
    let mut controller = CameraController::default();
    let mut camera = Camera::default();
    controller.start_drag(&camera, pos2(0.0, 0.0));
    assert!(controller.is_dragging());
    controller.update_drag(&mut camera, pos2(20.0, 0.0));
    controller.end_drag();
    assert!(!controller.is_dragging());

    let after_release = camera;
    assert!(!controller.update_drag(&mut camera, pos2(500.0, 500.0)));
    assert_eq!(camera, after_release);
}

#[test]
fn damping_sets_pixels_per_degree() {
    let mut controller = CameraController::new(4.0);
    let mut camera = Camera::default();
    controller.start_drag(&camera, pos2(0.0, 0.0));
    controller.update_drag(&mut camera, pos2(0.0, 20.0));
    assert!((camera.elevation().degrees() - 5.0).abs() < EPS);

    assert_eq!(CameraController::new(0.0).damping(), DEFAULT_DAMPING);
    assert_eq!(CameraController::new(f64::NAN).damping(), DEFAULT_DAMPING);
}
