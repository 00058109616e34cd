use cgmath::{Matrix4, Point3, Vector3, Vector4};
use meshcheck_geometry::{Angle, Vec3};
use tracing::debug;

use crate::screen::{Point2, ScreenPoint, Viewport};

/// Elevation is kept within a quarter turn of the horizon.
pub const ELEVATION_LIMIT: Angle = Angle::QUARTER_TURN;
/// Smallest distance the camera may sit from the origin.
pub const MIN_DISTANCE: f64 = 1.0e-3;
/// Distance used before a mesh is fitted, or when the mesh has no extent.
pub const DEFAULT_DISTANCE: f64 = 5.0;
/// Fitted distance as a multiple of the mesh scale.
pub const DISTANCE_FACTOR: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov: Angle,
    pub near: f64,
    pub far: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: Angle::from_degrees(70.0),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Replaces values `cgmath::perspective` would reject with usable ones.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let fov = if self.fov.radians().is_finite() {
            self.fov.clamp(Angle::from_degrees(1.0), Angle::from_degrees(179.0))
        } else {
            defaults.fov
        };
        let near = if self.near.is_finite() && self.near > 0.0 {
            self.near
        } else {
            defaults.near
        };
        let far = if self.far.is_finite() && self.far > near {
            self.far
        } else {
            near * 1.0e4
        };
        Self { fov, near, far }
    }
}

/// Orbit camera looking at the origin with +Y up.
///
/// The eye sits at `normalize(sin az, sin el, cos az) * distance`. Matrices are
/// derived on every call, nothing is cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    azimuth: Angle,
    elevation: Angle,
    distance: f64,
    projection: Projection,
    viewport: Viewport,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            azimuth: Angle::ZERO,
            elevation: Angle::ZERO,
            distance: DEFAULT_DISTANCE,
            projection: projection.sanitized(),
            viewport: Viewport::default(),
        }
    }

    pub fn azimuth(&self) -> Angle {
        self.azimuth
    }

    pub fn elevation(&self) -> Angle {
        self.elevation
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Azimuth is stored as given; elevation is clamped to
    /// `[-ELEVATION_LIMIT, ELEVATION_LIMIT]`. Non-finite angles are ignored.
    pub fn set_orbit(&mut self, azimuth: Angle, elevation: Angle) {
        if azimuth.radians().is_finite() {
            self.azimuth = azimuth;
        }
        if elevation.radians().is_finite() {
            self.elevation = elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        }
    }

    pub fn set_distance(&mut self, distance: f64) {
        if distance.is_finite() {
            self.distance = distance.max(MIN_DISTANCE);
        }
    }

    /// Multiplies the distance by `factor`; values below one move closer.
    pub fn zoom(&mut self, factor: f64) {
        self.set_distance(self.distance * factor);
    }

    /// Seeds the distance from a mesh scale, keeping the orbit angles.
    pub fn fit_scale(&mut self, scale: f64, factor: f64) {
        let distance = scale * factor;
        if distance.is_finite() && distance > 0.0 {
            self.set_distance(distance);
        } else {
            self.distance = DEFAULT_DISTANCE;
        }
        debug!(scale, distance = self.distance, "camera fitted");
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width.max(0.0), height.max(0.0));
    }

    pub fn aspect(&self) -> f64 {
        self.viewport.aspect()
    }

    pub fn eye_position(&self) -> Vec3 {
        let direction = Vec3::new(self.azimuth.sin(), self.elevation.sin(), self.azimuth.cos());
        direction.normalized() * self.distance
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(
            Point3::from(self.eye_position()),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        )
    }

    /// A zero, negative or non-finite `aspect` is treated as 1.
    pub fn projection_matrix(&self, aspect: f64) -> Matrix4<f64> {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        cgmath::perspective(
            self.projection.fov,
            aspect,
            self.projection.near,
            self.projection.far,
        )
    }

    pub fn view_projection_matrix(&self, aspect: f64) -> Matrix4<f64> {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World point to viewport pixels. `None` when the point lies closer
    /// than the near plane or behind the camera.
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let clip = self.clip(point);
        (clip.w >= self.projection.near).then(|| self.to_screen(clip))
    }

    /// Projects a segment, trimming the part that lies in front of the near
    /// plane. `None` when the whole segment is hidden.
    pub fn project_segment(&self, a: Vec3, b: Vec3) -> Option<(ScreenPoint, ScreenPoint)> {
        let near = self.projection.near;
        let mut ca = self.clip(a);
        let mut cb = self.clip(b);
        match (ca.w >= near, cb.w >= near) {
            (false, false) => return None,
            (true, false) => cb = clip_to_near(ca, cb, near),
            (false, true) => ca = clip_to_near(cb, ca, near),
            (true, true) => {}
        }
        Some((self.to_screen(ca), self.to_screen(cb)))
    }

    /// Projects a closed polygon, clipped against the near plane. The result
    /// is empty when nothing remains in view.
    pub fn project_polygon(&self, corners: &[Vec3]) -> Vec<ScreenPoint> {
        let near = self.projection.near;
        let clips: Vec<Vector4<f64>> = corners.iter().map(|p| self.clip(*p)).collect();
        if clips.iter().all(|c| c.w >= near) {
            return clips.into_iter().map(|c| self.to_screen(c)).collect();
        }

        let mut kept = Vec::with_capacity(clips.len() + 1);
        for (idx, current) in clips.iter().enumerate() {
            let next = clips[(idx + 1) % clips.len()];
            let current_in = current.w >= near;
            let next_in = next.w >= near;
            if current_in {
                kept.push(*current);
            }
            if current_in != next_in {
                let (inside, outside) = if current_in {
                    (*current, next)
                } else {
                    (next, *current)
                };
                kept.push(clip_to_near(inside, outside, near));
            }
        }
        if kept.len() < 3 {
            return Vec::new();
        }
        kept.into_iter().map(|c| self.to_screen(c)).collect()
    }

    fn clip(&self, point: Vec3) -> Vector4<f64> {
        self.view_projection_matrix(self.aspect()) * Vector4::new(point.x, point.y, point.z, 1.0)
    }

    fn to_screen(&self, clip: Vector4<f64>) -> ScreenPoint {
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let x = (ndc_x + 1.0) * 0.5 * width;
        let y = (1.0 - ndc_y) * 0.5 * height;
        ScreenPoint {
            pos: Point2::new(x as f32, y as f32),
            depth: clip.w,
        }
    }
}

fn clip_to_near(inside: Vector4<f64>, outside: Vector4<f64>, near: f64) -> Vector4<f64> {
    let t = (inside.w - near) / (inside.w - outside.w);
    inside + (outside - inside) * t
}
