use meshcheck_camera::Camera;
use meshcheck_geometry::{Face, Mesh, Vec3};

use super::overlay::OverlayPainter;
use super::ui::{Align2, Color32, Point2, Rect, Stroke, vec2};
use crate::config::{DisplayOptions, ViewerConfig};

const BACKGROUND_TOP: Color32 = Color32::from_gray(191);
const BACKGROUND_BOTTOM: Color32 = Color32::from_gray(128);

const AXIS_LENGTH: f64 = 1000.0;
const AXES: [(Vec3, Color32); 3] = [
    (Vec3::X, Color32::from_rgb(220, 40, 40)),
    (Vec3::Y, Color32::from_rgb(40, 180, 40)),
    (Vec3::Z, Color32::from_rgb(40, 80, 220)),
];

const FRONT_BASE: [f32; 3] = [0.35, 0.7, 0.85];
const BACK_BASE: [f32; 3] = [0.9, 0.4, 0.3];
/// Each successive fan triangle of a face is darker by this much.
const SHADE_STEP: f32 = 0.1;
const AMBIENT: f32 = 0.35;
const DIFFUSE: f32 = 0.65;

const EDGE_STROKE: Stroke = Stroke {
    width: 1.0,
    color: Color32::from_gray(40),
};
const NORMAL_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::from_rgb(255, 0, 0),
};
const MARKER_COLOR: Color32 = Color32::from_rgba_unmultiplied(0, 0, 0, 128);
const MARKER_STROKE: Stroke = Stroke {
    width: 3.0,
    color: MARKER_COLOR,
};
const LABEL_COLOR: Color32 = Color32::BLACK;

/// Lighting result for one face, lit from the camera position.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceShade {
    /// Index into [`Mesh::faces`].
    pub face: usize,
    /// Whether the normal points towards the camera.
    pub front: bool,
    /// One fill colour per fan triangle, in [`Face::triangles`] order.
    pub triangles: Vec<Color32>,
}

pub fn face_shades(mesh: &Mesh, camera: &Camera) -> Vec<FaceShade> {
    let eye = camera.eye_position();
    mesh.faces()
        .iter()
        .enumerate()
        .map(|(idx, face)| shade_face(idx, face, eye))
        .collect()
}

fn shade_face(idx: usize, face: &Face, eye: Vec3) -> FaceShade {
    let to_eye = (eye - face.centroid()).normalized();
    let facing = face.normal().dot(to_eye);
    let front = facing > 0.0;
    let intensity = AMBIENT + DIFFUSE * facing.abs() as f32;
    let base = if front { FRONT_BASE } else { BACK_BASE };

    let triangles = (0..face.triangles().count())
        .map(|step| {
            let darken = SHADE_STEP * step as f32;
            Color32::from_rgb_f32(base.map(|c| (c - darken).max(0.0) * intensity))
        })
        .collect();
    FaceShade {
        face: idx,
        front,
        triangles,
    }
}

/// Draws one frame. `camera`'s viewport must match the size of `rect`.
///
/// Faces are ordered back to front by centroid distance, and each face's
/// marker, label and normal are drawn right after its fill.
pub fn paint_scene<P: OverlayPainter>(
    painter: &mut P,
    rect: Rect,
    mesh: Option<&Mesh>,
    camera: &Camera,
    config: &ViewerConfig,
) {
    painter.rect_gradient(rect, BACKGROUND_TOP, BACKGROUND_BOTTOM);

    let display = config.display;
    if display.axes {
        for (axis, color) in AXES {
            line(painter, rect, camera, Vec3::ZERO, axis * AXIS_LENGTH, Stroke::new(1.0, color));
        }
    }

    let Some(mesh) = mesh else {
        painter.text(
            rect.center(),
            Align2::CenterCenter,
            "Drop a mesh file here".to_string(),
            config.labels.vertex_size,
            LABEL_COLOR,
        );
        return;
    };

    let eye = camera.eye_position();
    let shades = face_shades(mesh, camera);
    let mut order: Vec<(usize, f64)> = mesh
        .faces()
        .iter()
        .enumerate()
        .map(|(idx, face)| (idx, eye.distance(face.centroid())))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (idx, _) in order {
        let face = &mesh.faces()[idx];
        let shade = &shades[idx];
        let hidden = !shade.front && display.cull_back_faces;
        if !hidden {
            paint_face(painter, rect, mesh, face, shade, camera);
            paint_face_overlays(painter, rect, mesh, face, camera, config, display);
        }
        if display.normals {
            let (start, end) = mesh.normal_segment(face);
            line(painter, rect, camera, start, end, NORMAL_STROKE);
        }
    }

    if display.vertex_labels {
        for vertex in mesh.vertices() {
            if let Some(projected) = camera.project(vertex.position()) {
                let pos = offset(rect, projected.pos) + vec2(4.0, -4.0);
                painter.text(
                    pos,
                    Align2::LeftBottom,
                    vertex.name().to_string(),
                    config.labels.vertex_size,
                    LABEL_COLOR,
                );
            }
        }
    }
}

fn paint_face<P: OverlayPainter>(
    painter: &mut P,
    rect: Rect,
    mesh: &Mesh,
    face: &Face,
    shade: &FaceShade,
    camera: &Camera,
) {
    for (tri, fill) in face.triangles().zip(shade.triangles.iter().copied()) {
        let corners = tri.map(|idx| mesh.position(idx));
        let points: Vec<Point2> = camera
            .project_polygon(&corners)
            .into_iter()
            .map(|p| offset(rect, p.pos))
            .collect();
        if points.len() >= 3 {
            painter.polygon(points, fill, Stroke::NONE);
        }
    }

    let corners: Vec<Vec3> = mesh.face_positions(face).collect();
    for (idx, start) in corners.iter().enumerate() {
        let end = corners[(idx + 1) % corners.len()];
        line(painter, rect, camera, *start, end, EDGE_STROKE);
    }
}

fn paint_face_overlays<P: OverlayPainter>(
    painter: &mut P,
    rect: Rect,
    mesh: &Mesh,
    face: &Face,
    camera: &Camera,
    config: &ViewerConfig,
    display: DisplayOptions,
) {
    if display.markers {
        let marker = mesh.orientation_marker(face);
        for pair in marker.path.windows(2) {
            line(painter, rect, camera, pair[0], pair[1], MARKER_STROKE);
        }
        let arrow: Vec<Point2> = camera
            .project_polygon(&marker.arrow)
            .into_iter()
            .map(|p| offset(rect, p.pos))
            .collect();
        if arrow.len() >= 3 {
            painter.polygon(arrow, MARKER_COLOR, Stroke::NONE);
        }
    }

    if display.face_labels {
        paint_face_label(painter, rect, mesh, face, camera, config);
    }
}

/// Places the face name in the face plane: the label frame fixes the centre
/// and the direction of the baseline, the distance fixes the glyph size.
fn paint_face_label<P: OverlayPainter>(
    painter: &mut P,
    rect: Rect,
    mesh: &Mesh,
    face: &Face,
    camera: &Camera,
    config: &ViewerConfig,
) {
    let labels = &config.labels;
    let frame = mesh.label_frame(face, labels.offset_ratio);
    let world_height = (mesh.scale() * labels.face_height_ratio).max(f64::EPSILON);
    let Some(center) = camera.project(frame.transform_point(Vec3::ZERO)) else {
        return;
    };
    let Some(along) = camera.project(frame.transform_point(Vec3::X * world_height)) else {
        return;
    };

    let projection = camera.projection();
    let half_height = f64::from(camera.viewport().height) * 0.5;
    let focal = half_height / (projection.fov.radians() * 0.5).tan();
    let size = (world_height * focal / center.depth) as f32;
    let size = size.clamp(labels.face_min_size, labels.face_max_size.max(labels.face_min_size));

    let baseline = along.pos - center.pos;
    let angle = if baseline.length() > f32::EPSILON {
        baseline.y.atan2(baseline.x)
    } else {
        0.0
    };
    painter.rotated_text(
        offset(rect, center.pos),
        angle,
        face.name().to_string(),
        size,
        LABEL_COLOR,
    );
}

fn line<P: OverlayPainter>(
    painter: &mut P,
    rect: Rect,
    camera: &Camera,
    start: Vec3,
    end: Vec3,
    stroke: Stroke,
) {
    if let Some((a, b)) = camera.project_segment(start, end) {
        painter.line_segment(offset(rect, a.pos), offset(rect, b.pos), stroke);
    }
}

fn offset(rect: Rect, pos: Point2) -> Point2 {
    Point2::new(pos.x + rect.min.x, pos.y + rect.min.y)
}
