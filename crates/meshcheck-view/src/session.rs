use std::path::{Path, PathBuf};

use meshcheck_base::Result;
use meshcheck_camera::{Camera, CameraController};
use meshcheck_geometry::{Angle, Mesh};
use meshcheck_io::{load_mesh, parse_mesh};
use tracing::{info, warn};

use crate::config::{DisplayOptions, ViewerConfig};
use crate::viewer::{OverlayPainter, Rect, ViewerEvent, paint_scene};

/// Everything one viewer window shows: the current mesh, where it came
/// from, and the camera looking at it.
///
/// A mesh is only installed once it has been fully built, so a failed load
/// leaves the previous mesh and camera untouched.
#[derive(Clone, Debug)]
pub struct ViewerSession {
    config: ViewerConfig,
    mesh: Option<Mesh>,
    source: Option<PathBuf>,
    camera: Camera,
    controller: CameraController,
    status: String,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        let camera = Camera::new(config.camera.projection());
        let controller = CameraController::new(config.camera.drag_damping);
        Self {
            config,
            mesh: None,
            source: None,
            camera,
            controller,
            status: "No mesh loaded".to_string(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.config.display
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// File the current mesh was read from; `None` for pasted meshes.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// One-line description of the last load, for the status bar.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match load_mesh(path) {
            Ok(mesh) => {
                self.install(mesh, &path.display().to_string());
                self.source = Some(path.to_path_buf());
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "mesh rejected");
                self.status = format!("Failed to load {}: {err}", path.display());
                Err(err)
            }
        }
    }

    /// Loads mesh JSON that did not come from a file, such as a clipboard
    /// paste. `label` names the origin in logs and the status bar.
    pub fn load_text(&mut self, text: &str, label: &str) -> Result<()> {
        match parse_mesh(text) {
            Ok(mesh) => {
                self.install(mesh, label);
                self.source = None;
                Ok(())
            }
            Err(err) => {
                warn!(label, %err, "mesh rejected");
                self.status = format!("Failed to load {label}: {err}");
                Err(err)
            }
        }
    }

    /// Reads the source file again. Returns `Ok(false)` when the current
    /// mesh has no source file.
    pub fn reload(&mut self) -> Result<bool> {
        let Some(path) = self.source.clone() else {
            self.status = "Nothing to reload".to_string();
            return Ok(false);
        };
        self.load_path(path)?;
        Ok(true)
    }

    /// Back to the initial orbit, at the fitted distance for the current mesh.
    pub fn reset_view(&mut self) {
        self.controller.end_drag();
        self.camera.set_orbit(Angle::ZERO, Angle::ZERO);
        let scale = self.mesh.as_ref().map_or(0.0, Mesh::scale);
        self.camera.fit_scale(scale, self.config.camera.distance_factor);
    }

    fn install(&mut self, mesh: Mesh, label: &str) {
        self.controller.end_drag();
        self.camera
            .fit_scale(mesh.scale(), self.config.camera.distance_factor);
        info!(
            source = label,
            vertices = mesh.vertices().len(),
            faces = mesh.faces().len(),
            scale = mesh.scale(),
            "mesh installed"
        );
        self.status = format!(
            "{label}: {} vertices, {} faces",
            mesh.vertices().len(),
            mesh.faces().len()
        );
        self.mesh = Some(mesh);
    }

    /// Applies one input event. Returns `true` when the view changed.
    pub fn handle_event(&mut self, event: ViewerEvent) -> bool {
        let orbit_button = self.config.camera.orbit_button;
        match event {
            ViewerEvent::PointerMove { pos } => self.controller.update_drag(&mut self.camera, pos),
            ViewerEvent::ButtonPress { button, pos } if button == orbit_button => {
                self.controller.start_drag(&self.camera, pos);
                false
            }
            ViewerEvent::ButtonRelease { button, pos } if button == orbit_button => {
                let moved = self.controller.update_drag(&mut self.camera, pos);
                self.controller.end_drag();
                moved
            }
            ViewerEvent::ButtonPress { .. } | ViewerEvent::ButtonRelease { .. } => false,
            ViewerEvent::Scroll { notches } => {
                if notches == 0.0 || !notches.is_finite() {
                    return false;
                }
                self.camera.zoom(self.config.camera.zoom_factor(notches));
                true
            }
            ViewerEvent::Resize { width, height } => {
                let before = self.camera.viewport();
                self.camera.set_viewport(width, height);
                self.camera.viewport() != before
            }
        }
    }

    /// `rect` should have the size last passed in [`ViewerEvent::Resize`].
    pub fn paint<P: OverlayPainter>(&self, painter: &mut P, rect: Rect) {
        paint_scene(painter, rect, self.mesh.as_ref(), &self.camera, &self.config);
    }

    /// Key/value rows describing the mesh and camera, for the side panel.
    pub fn info_rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        match &self.mesh {
            Some(mesh) => {
                rows.push(("Vertices".to_string(), mesh.vertices().len().to_string()));
                rows.push(("Faces".to_string(), mesh.faces().len().to_string()));
                rows.push((
                    "Triangles".to_string(),
                    mesh.triangle_indices().len().to_string(),
                ));
                rows.push(("Scale".to_string(), format!("{:.3}", mesh.scale())));
            }
            None => rows.push(("Mesh".to_string(), "None".to_string())),
        }
        rows.push(("Azimuth".to_string(), self.camera.azimuth().to_string()));
        rows.push(("Elevation".to_string(), self.camera.elevation().to_string()));
        rows.push((
            "Distance".to_string(),
            format!("{:.3}", self.camera.distance()),
        ));
        rows
    }
}
