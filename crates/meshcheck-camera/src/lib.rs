pub mod camera;
pub mod controller;
pub mod screen;

pub use camera::{
    Camera, DEFAULT_DISTANCE, DISTANCE_FACTOR, ELEVATION_LIMIT, MIN_DISTANCE, Projection,
};
pub use controller::{CameraController, DEFAULT_DAMPING};
pub use screen::{Point2, ScreenPoint, Vec2, Viewport, pos2, vec2};
