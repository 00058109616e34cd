use std::collections::HashMap;

use meshcheck_base::{Error, NameKind, Result, Tolerance};
use serde::Serialize;
use tracing::debug;

use crate::frame::FaceFrame;
use crate::marker::OrientationMarker;
use crate::vector::Vec3;

/// Label lift above the face plane, as a fraction of the mesh scale.
pub const LABEL_OFFSET_RATIO: f64 = 0.01;
/// Marker lift above the face plane, as a fraction of the mesh scale.
pub const MARKER_LIFT_RATIO: f64 = 0.001;
/// Length of the drawn normal segment, as a fraction of the mesh scale.
pub const NORMAL_LENGTH_RATIO: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    name: String,
    position: Vec3,
}

impl Vertex {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// A named polygon with its normal and centroid computed once at construction.
///
/// Winding convention: the normal is
/// `normalize(cross(v2 - v1, v0 - v1))`, so vertices listed counter-clockwise
/// when seen from the front give a normal pointing at the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    name: String,
    vertices: Vec<usize>,
    normal: Vec3,
    centroid: Vec3,
}

impl Face {
    fn build(
        name: String,
        vertices: Vec<usize>,
        mesh_vertices: &[Vertex],
        tolerance: Tolerance,
    ) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::malformed(format!(
                "face `{name}` has {} vertices, at least 3 are required",
                vertices.len()
            )));
        }

        let corners: Vec<Vec3> = vertices.iter().map(|&idx| mesh_vertices[idx].position).collect();
        let Some(normal) = plane_normal(corners[0], corners[1], corners[2], tolerance) else {
            return Err(Error::DegenerateFace { face: name });
        };

        let mut sum = Vec3::ZERO;
        for corner in &corners {
            sum += *corner;
        }
        let centroid = sum / corners.len() as f64;

        Ok(Self {
            name,
            vertices,
            normal,
            centroid,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh vertex indices, in winding order.
    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Fan triangulation from the first corner, in mesh vertex indices.
    ///
    /// Valid for convex planar polygons; concave faces come out visually wrong
    /// but are not rejected.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let first = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(move |pair| [first, pair[0], pair[1]])
    }
}

/// Unit normal of the plane through `p0`, `p1`, `p2`, or `None` when the
/// points are coincident or collinear.
pub fn plane_normal(p0: Vec3, p1: Vec3, p2: Vec3, tolerance: Tolerance) -> Option<Vec3> {
    let forward = p2 - p1;
    let back = p0 - p1;
    let forward_len = forward.length();
    let back_len = back.length();
    // Relative to the edge lengths, so the test holds at any mesh scale.
    // Coincident corners give zero on both sides and fail it.
    let cross = forward.cross(back);
    let cross_len = cross.length();
    if !(cross_len > tolerance.angular * forward_len * back_len) {
        return None;
    }
    Some(cross / cross_len)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Widest extent over the three axes.
    pub fn scale(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

/// Collects vertices and faces, validating each insertion.
///
/// A failed call leaves the builder exactly as it was.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    vertex_lookup: HashMap<String, usize>,
    faces: Vec<Face>,
    face_lookup: HashMap<String, usize>,
    tolerance: Tolerance,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, name: impl Into<String>, x: f64, y: f64, z: f64) -> Result<()> {
        let name = name.into();
        if self.vertex_lookup.contains_key(&name) {
            return Err(Error::duplicate(NameKind::Vertex, name));
        }
        let position = Vec3::new(x, y, z);
        if !position.is_finite() {
            return Err(Error::malformed(format!(
                "vertex `{name}` has a non-finite coordinate"
            )));
        }
        self.vertex_lookup.insert(name.clone(), self.vertices.len());
        self.vertices.push(Vertex { name, position });
        Ok(())
    }

    pub fn add_face<S>(&mut self, name: impl Into<String>, vertex_names: &[S]) -> Result<()>
    where
        S: AsRef<str>,
    {
        let name = name.into();
        if self.face_lookup.contains_key(&name) {
            return Err(Error::duplicate(NameKind::Face, name));
        }

        let mut indices = Vec::with_capacity(vertex_names.len());
        for vertex in vertex_names {
            let vertex = vertex.as_ref();
            let Some(&idx) = self.vertex_lookup.get(vertex) else {
                return Err(Error::UnknownVertex {
                    face: name,
                    vertex: vertex.to_string(),
                });
            };
            indices.push(idx);
        }

        let face = Face::build(name, indices, &self.vertices, self.tolerance)?;
        self.face_lookup.insert(face.name.clone(), self.faces.len());
        self.faces.push(face);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn build(self) -> Mesh {
        let bounds = Bounds::from_points(self.vertices.iter().map(|v| v.position));
        let scale = bounds.map(|b| b.scale()).unwrap_or(0.0);
        debug!(
            vertices = self.vertices.len(),
            faces = self.faces.len(),
            scale,
            "mesh built"
        );
        Mesh {
            vertices: self.vertices,
            vertex_lookup: self.vertex_lookup,
            faces: self.faces,
            face_lookup: self.face_lookup,
            bounds,
            scale,
        }
    }
}

/// A fully validated mesh. Vertices and faces keep their insertion order.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    vertex_lookup: HashMap<String, usize>,
    faces: Vec<Face>,
    face_lookup: HashMap<String, usize>,
    bounds: Option<Bounds>,
    scale: f64,
}

impl Mesh {
    pub fn builder() -> MeshBuilder {
        MeshBuilder::new()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.vertex_lookup.get(name).map(|&idx| &self.vertices[idx])
    }

    pub fn face(&self, name: &str) -> Option<&Face> {
        self.face_lookup.get(name).map(|&idx| &self.faces[idx])
    }

    pub fn position(&self, idx: usize) -> Vec3 {
        self.vertices[idx].position
    }

    pub fn face_positions<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Vec3> + 'a {
        face.vertices.iter().map(|&idx| self.vertices[idx].position)
    }

    /// `None` only for a mesh without vertices.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Every face's fan triangles, concatenated in face order.
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        self.faces.iter().flat_map(|face| face.triangles()).collect()
    }

    /// Start and end of the normal indicator drawn from the face centroid.
    pub fn normal_segment(&self, face: &Face) -> (Vec3, Vec3) {
        let start = face.centroid;
        (start, start + face.normal * (self.scale * NORMAL_LENGTH_RATIO))
    }

    /// Label placement lifted `offset_ratio` times the mesh scale off the
    /// face. [`LABEL_OFFSET_RATIO`] is the usual choice.
    pub fn label_frame(&self, face: &Face, offset_ratio: f64) -> FaceFrame {
        FaceFrame::new(face.normal, face.centroid, self.scale * offset_ratio)
    }

    pub fn orientation_marker(&self, face: &Face) -> OrientationMarker {
        let corners: Vec<Vec3> = self.face_positions(face).collect();
        OrientationMarker::new(
            &corners,
            face.centroid,
            face.normal,
            self.scale * MARKER_LIFT_RATIO,
        )
    }
}
