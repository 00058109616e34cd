use crate::vector::Vec3;

const CORNER_PULL: f64 = 0.75;
const ARROW_BASE: f64 = 0.95;

/// Winding indicator for one face: a polyline through points near each
/// corner and an arrowhead pointing from the second corner to the third.
#[derive(Clone, Debug, PartialEq)]
pub struct OrientationMarker {
    pub path: Vec<Vec3>,
    pub arrow: [Vec3; 3],
}

impl OrientationMarker {
    /// `corners` must hold at least three points.
    pub fn new(corners: &[Vec3], centroid: Vec3, normal: Vec3, lift: f64) -> Self {
        let lift = normal * lift;
        let path: Vec<Vec3> = corners
            .iter()
            .map(|corner| centroid.lerp(*corner, CORNER_PULL) + lift)
            .collect();

        let base = path[1].lerp(path[2], ARROW_BASE);
        let tip = path[2];
        let side = normal.cross(tip - base);
        let arrow = [base - side, tip, base + side];

        Self { path, arrow }
    }

    /// The first marked corner, which is where the face winding starts.
    pub fn start(&self) -> Vec3 {
        self.path[0]
    }
}
