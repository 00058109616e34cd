use std::fmt::Write;

use meshcheck_geometry::{Bounds, Mesh, Vec3};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct FaceReport {
    pub name: String,
    pub vertices: Vec<String>,
    pub normal: Vec3,
    pub centroid: Vec3,
    pub triangles: usize,
}

/// Summary of a loaded mesh, printed by `headless report`.
#[derive(Clone, Debug, Serialize)]
pub struct MeshReport {
    pub vertices: usize,
    pub faces: usize,
    pub triangles: usize,
    pub bounds: Option<Bounds>,
    pub scale: f64,
    pub camera_distance: f64,
    pub face_details: Vec<FaceReport>,
}

impl MeshReport {
    pub fn new(mesh: &Mesh, distance_factor: f64) -> Self {
        let face_details = mesh
            .faces()
            .iter()
            .map(|face| FaceReport {
                name: face.name().to_string(),
                vertices: face
                    .vertex_indices()
                    .iter()
                    .map(|&idx| mesh.vertices()[idx].name().to_string())
                    .collect(),
                normal: face.normal(),
                centroid: face.centroid(),
                triangles: face.triangles().count(),
            })
            .collect();
        Self {
            vertices: mesh.vertices().len(),
            faces: mesh.faces().len(),
            triangles: mesh.triangle_indices().len(),
            bounds: mesh.bounds(),
            scale: mesh.scale(),
            camera_distance: mesh.scale() * distance_factor,
            face_details,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "vertices: {}", self.vertices);
        let _ = writeln!(out, "faces: {}", self.faces);
        let _ = writeln!(out, "triangles: {}", self.triangles);
        match self.bounds {
            Some(bounds) => {
                let _ = writeln!(
                    out,
                    "bounds: {} .. {}",
                    format_point(bounds.min),
                    format_point(bounds.max)
                );
            }
            None => {
                let _ = writeln!(out, "bounds: none");
            }
        }
        let _ = writeln!(out, "scale: {:.3}", self.scale);
        let _ = writeln!(out, "camera distance: {:.3}", self.camera_distance);
        for face in &self.face_details {
            let _ = writeln!(
                out,
                "face {} [{}] normal ({}) centroid ({})",
                face.name,
                face.vertices.join(", "),
                format_point(face.normal),
                format_point(face.centroid)
            );
        }
        out
    }
}

pub fn format_point(point: Vec3) -> String {
    format!("{:.3}, {:.3}, {:.3}", point.x, point.y, point.z)
}
