use meshcheck_geometry::Angle;

use crate::camera::Camera;
use crate::screen::Point2;

/// Pointer pixels per degree of rotation.
pub const DEFAULT_DAMPING: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
    azimuth: Angle,
    elevation: Angle,
    start: Point2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Turns pointer drags into orbit angles.
///
/// Every update is computed from the snapshot taken when the drag started,
/// so the camera orientation depends only on the total pointer offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraController {
    state: DragState,
    damping: f64,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING)
    }
}

impl CameraController {
    /// Non-positive or non-finite damping falls back to [`DEFAULT_DAMPING`].
    pub fn new(damping: f64) -> Self {
        let damping = if damping.is_finite() && damping > 0.0 {
            damping
        } else {
            DEFAULT_DAMPING
        };
        Self {
            state: DragState::Idle,
            damping,
        }
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Starting again while dragging replaces the previous snapshot.
    pub fn start_drag(&mut self, camera: &Camera, pos: Point2) {
        self.state = DragState::Dragging(DragSession {
            azimuth: camera.azimuth(),
            elevation: camera.elevation(),
            start: pos,
        });
    }

    /// Returns `false` and leaves the camera alone when no drag is active.
    pub fn update_drag(&self, camera: &mut Camera, pos: Point2) -> bool {
        let DragState::Dragging(session) = self.state else {
            return false;
        };
        let delta = pos - session.start;
        let delta_azimuth = Angle::from_degrees(f64::from(delta.x) / self.damping);
        let delta_elevation = Angle::from_degrees(f64::from(delta.y) / self.damping);
        camera.set_orbit(
            session.azimuth - delta_azimuth,
            session.elevation + delta_elevation,
        );
        true
    }

    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }
}
