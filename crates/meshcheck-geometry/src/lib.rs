pub mod angle;
pub mod frame;
pub mod marker;
pub mod mesh;
pub mod vector;

pub use angle::Angle;
pub use frame::{FLIP_AXIS, FaceFrame, FrameRotation, LABEL_FORWARD};
pub use marker::OrientationMarker;
pub use mesh::{
    Bounds, Face, LABEL_OFFSET_RATIO, MARKER_LIFT_RATIO, Mesh, MeshBuilder, NORMAL_LENGTH_RATIO,
    Vertex, plane_normal,
};
pub use vector::{Vec3, rotate_around_axis};
