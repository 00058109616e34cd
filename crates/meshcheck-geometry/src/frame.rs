use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::angle::Angle;
use crate::vector::{Vec3, rotate_around_axis};

/// Labels are laid out in the local X/Y plane and face along local +Z.
pub const LABEL_FORWARD: Vec3 = Vec3::Z;
/// Rotation axis used when the face normal points almost exactly along -Z.
pub const FLIP_AXIS: Vec3 = Vec3::Y;

const ALIGNMENT_LIMIT: f64 = 0.99;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameRotation {
    Identity,
    /// Half turn about [`FLIP_AXIS`].
    Flip,
    Axis { axis: Vec3, angle: Angle },
}

impl FrameRotation {
    /// Minimal rotation taking [`LABEL_FORWARD`] onto `normal`.
    ///
    /// Near-parallel and near-antiparallel normals get fixed answers because
    /// the cross product axis vanishes there.
    pub fn aligning(normal: Vec3) -> Self {
        let dot = LABEL_FORWARD.dot(normal);
        if dot < -ALIGNMENT_LIMIT {
            Self::Flip
        } else if dot < ALIGNMENT_LIMIT {
            let axis = LABEL_FORWARD.cross(normal).normalized();
            let angle = Angle::from_radians(dot.clamp(-1.0, 1.0).acos());
            Self::Axis { axis, angle }
        } else {
            Self::Identity
        }
    }

    pub fn axis_angle(&self) -> Option<(Vec3, Angle)> {
        match *self {
            Self::Identity => None,
            Self::Flip => Some((FLIP_AXIS, Angle::HALF_TURN)),
            Self::Axis { axis, angle } => Some((axis, angle)),
        }
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        match self.axis_angle() {
            Some((axis, angle)) => rotate_around_axis(v, Vec3::ZERO, axis, angle.radians()),
            None => v,
        }
    }

    pub fn matrix(&self) -> Matrix4<f64> {
        match self.axis_angle() {
            Some((axis, angle)) => Matrix4::from_axis_angle(Vector3::from(axis), angle),
            None => Matrix4::identity(),
        }
    }
}

/// Rigid placement of a flat label onto a face: translate to the centroid,
/// rotate local +Z onto the normal, then lift along the normal by `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceFrame {
    origin: Vec3,
    rotation: FrameRotation,
    offset: f64,
}

impl FaceFrame {
    pub fn new(normal: Vec3, centroid: Vec3, offset: f64) -> Self {
        Self {
            origin: centroid,
            rotation: FrameRotation::aligning(normal),
            offset,
        }
    }

    pub fn rotation(&self) -> FrameRotation {
        self.rotation
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::from_translation(Vector3::from(self.origin))
            * self.rotation.matrix()
            * Matrix4::from_translation(Vector3::new(0.0, 0.0, self.offset))
    }

    /// Maps a point of the label's local plane into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        let lifted = local + Vec3::new(0.0, 0.0, self.offset);
        self.origin + self.rotation.apply(lifted)
    }

    /// World-space directions of the local X, Y and Z axes.
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.rotation.apply(Vec3::X),
            self.rotation.apply(Vec3::Y),
            self.rotation.apply(Vec3::Z),
        ]
    }
}
