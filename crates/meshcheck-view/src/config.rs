use std::fs;
use std::path::Path;

use meshcheck_base::{Error, Result};
use meshcheck_camera::{DEFAULT_DAMPING, DISTANCE_FACTOR, Projection};
use meshcheck_geometry::{Angle, LABEL_OFFSET_RATIO};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::viewer::PointerButton;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraSettings,
    pub labels: LabelSettings,
    pub display: DisplayOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Pointer pixels per degree of orbit.
    pub drag_damping: f64,
    /// Distance multiplier applied per scroll notch towards the mesh.
    pub zoom_step: f64,
    /// Camera distance on load, as a multiple of the mesh scale.
    pub distance_factor: f64,
    pub orbit_button: PointerButton,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let projection = Projection::default();
        Self {
            fov_degrees: projection.fov.degrees(),
            near: projection.near,
            far: projection.far,
            drag_damping: DEFAULT_DAMPING,
            zoom_step: 0.9,
            distance_factor: DISTANCE_FACTOR,
            orbit_button: PointerButton::Primary,
        }
    }
}

impl CameraSettings {
    pub fn projection(&self) -> Projection {
        Projection {
            fov: Angle::from_degrees(self.fov_degrees),
            near: self.near,
            far: self.far,
        }
    }

    /// Distance multiplier for a scroll of `notches`; out-of-range steps
    /// fall back to the default.
    pub fn zoom_factor(&self, notches: f32) -> f64 {
        let step = if self.zoom_step.is_finite() && self.zoom_step > 0.0 {
            self.zoom_step
        } else {
            Self::default().zoom_step
        };
        step.powf(f64::from(notches))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Face label lift above the face, as a fraction of the mesh scale.
    pub offset_ratio: f64,
    /// Face label glyph height, as a fraction of the mesh scale.
    pub face_height_ratio: f64,
    pub face_min_size: f32,
    pub face_max_size: f32,
    pub vertex_size: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            offset_ratio: LABEL_OFFSET_RATIO,
            face_height_ratio: 0.12,
            face_min_size: 8.0,
            face_max_size: 48.0,
            vertex_size: 14.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub normals: bool,
    pub markers: bool,
    pub face_labels: bool,
    pub vertex_labels: bool,
    pub axes: bool,
    /// When off, back faces are drawn in a warning tint instead of hidden.
    pub cull_back_faces: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            normals: true,
            markers: true,
            face_labels: true,
            vertex_labels: true,
            axes: true,
            cull_back_faces: true,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::malformed(format!("config: {err}")))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
