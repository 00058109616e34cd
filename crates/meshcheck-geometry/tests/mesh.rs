use meshcheck_base::{Error, NameKind, Result};
use meshcheck_geometry::{Bounds, FrameRotation, LABEL_OFFSET_RATIO, Mesh, MeshBuilder, Vec3};

const EPS: f64 = 1.0e-9;

fn assert_vec_close(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < EPS,
        "expected {expected:?}, got {actual:?}"
    );
}

fn unit_square() -> Result<Mesh> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 0.0, 0.0, 0.0)?;
    builder.add_vertex("b", 1.0, 0.0, 0.0)?;
    builder.add_vertex("c", 1.0, 1.0, 0.0)?;
    builder.add_vertex("d", 0.0, 1.0, 0.0)?;
    builder.add_face("square", &["a", "b", "c", "d"])?;
    Ok(builder.build())
}

#[test]
fn counter_clockwise_triangle_points_up() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("A", 0.0, 0.0, 0.0)?;
    builder.add_vertex("B", 1.0, 0.0, 0.0)?;
    builder.add_vertex("C", 0.0, 1.0, 0.0)?;
    builder.add_face("tri", &["A", "B", "C"])?;
    let mesh = builder.build();

    let face = mesh.face("tri").expect("face exists");
    assert_vec_close(face.normal(), Vec3::Z);
    assert!((face.normal().length() - 1.0).abs() < EPS);
    Ok(())
}

#[test]
fn reversed_winding_flips_normal() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("A", 0.0, 0.0, 0.0)?;
    builder.add_vertex("B", 1.0, 0.0, 0.0)?;
    builder.add_vertex("C", 0.0, 1.0, 0.0)?;
    builder.add_face("tri", &["A", "C", "B"])?;
    let mesh = builder.build();

    assert_vec_close(mesh.faces()[0].normal(), -Vec3::Z);
    Ok(())
}

#[test]
fn normal_is_unit_length_for_large_faces() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("p", 0.0, 0.0, 0.0)?;
    builder.add_vertex("q", 0.0, 500.0, 0.0)?;
    builder.add_vertex("r", 0.0, 0.0, 250.0)?;
    builder.add_face("wall", &["p", "q", "r"])?;
    let mesh = builder.build();

    let normal = mesh.faces()[0].normal();
    assert!((normal.length() - 1.0).abs() < EPS);
    assert_vec_close(normal, Vec3::X);
    Ok(())
}

#[test]
fn centroid_averages_every_corner() -> Result<()> {
    let mesh = unit_square()?;
    let face = mesh.face("square").expect("face exists");
    assert_vec_close(face.centroid(), Vec3::new(0.5, 0.5, 0.0));
    Ok(())
}

#[test]
fn square_is_fanned_from_first_corner() -> Result<()> {
    let mesh = unit_square()?;
    let face = &mesh.faces()[0];
    let triangles: Vec<[usize; 3]> = face.triangles().collect();
    assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3]]);
    assert_eq!(mesh.triangle_indices(), triangles);
    Ok(())
}

#[test]
fn pentagon_yields_three_triangles() -> Result<()> {
    let mut builder = MeshBuilder::new();
    let names = ["p0", "p1", "p2", "p3", "p4"];
    for (idx, name) in names.iter().enumerate() {
        let t = idx as f64 / 5.0 * std::f64::consts::TAU;
        builder.add_vertex(*name, t.cos(), t.sin(), 0.0)?;
    }
    builder.add_face("pent", &names)?;
    let mesh = builder.build();

    let triangles = mesh.triangle_indices();
    assert_eq!(triangles.len(), 3);
    assert!(triangles.iter().all(|tri| tri[0] == 0));
    Ok(())
}

#[test]
fn duplicate_vertex_is_rejected_without_side_effects() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("v1", 0.0, 0.0, 0.0)?;
    let err = builder
        .add_vertex("v1", 5.0, 5.0, 5.0)
        .expect_err("second insert must fail");
    assert!(matches!(
        err,
        Error::DuplicateName { kind: NameKind::Vertex, ref name } if name == "v1"
    ));
    assert_eq!(builder.vertex_count(), 1);

    let mesh = builder.build();
    assert_vec_close(mesh.vertex("v1").expect("kept").position(), Vec3::ZERO);
    Ok(())
}

#[test]
fn duplicate_face_is_rejected() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 0.0, 0.0, 0.0)?;
    builder.add_vertex("b", 1.0, 0.0, 0.0)?;
    builder.add_vertex("c", 0.0, 1.0, 0.0)?;
    builder.add_face("f", &["a", "b", "c"])?;
    let err = builder.add_face("f", &["c", "b", "a"]).expect_err("duplicate");
    assert!(matches!(err, Error::DuplicateName { kind: NameKind::Face, .. }));
    assert_eq!(builder.face_count(), 1);
    Ok(())
}

#[test]
fn unknown_vertex_is_rejected() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("v1", 0.0, 0.0, 0.0)?;
    builder.add_vertex("v2", 1.0, 0.0, 0.0)?;
    let err = builder
        .add_face("f", &["v1", "v2", "v99"])
        .expect_err("v99 does not exist");
    assert!(matches!(
        err,
        Error::UnknownVertex { ref face, ref vertex } if face == "f" && vertex == "v99"
    ));
    assert_eq!(builder.face_count(), 0);
    Ok(())
}

#[test]
fn collinear_face_is_degenerate() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 0.0, 0.0, 0.0)?;
    builder.add_vertex("b", 1.0, 0.0, 0.0)?;
    builder.add_vertex("c", 2.0, 0.0, 0.0)?;
    let err = builder.add_face("line", &["a", "b", "c"]).expect_err("collinear");
    assert!(matches!(err, Error::DegenerateFace { ref face } if face == "line"));
    assert_eq!(builder.face_count(), 0);
    Ok(())
}

#[test]
fn repeated_corner_is_degenerate() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 0.0, 0.0, 0.0)?;
    builder.add_vertex("b", 1.0, 0.0, 0.0)?;
    let err = builder.add_face("pinch", &["a", "b", "b"]).expect_err("repeated");
    assert!(matches!(err, Error::DegenerateFace { .. }));
    Ok(())
}

#[test]
fn short_face_is_malformed() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 0.0, 0.0, 0.0)?;
    builder.add_vertex("b", 1.0, 0.0, 0.0)?;
    let err = builder.add_face("edge", &["a", "b"]).expect_err("two corners");
    assert!(matches!(err, Error::MalformedInput(_)));
    Ok(())
}

#[test]
fn non_finite_vertex_is_malformed() {
    let mut builder = MeshBuilder::new();
    let err = builder
        .add_vertex("nan", f64::NAN, 0.0, 0.0)
        .expect_err("NaN coordinate");
    assert!(matches!(err, Error::MalformedInput(_)));
    assert_eq!(builder.vertex_count(), 0);
}

#[test]
fn bounds_and_scale_match_direct_computation() -> Result<()> {
    let points = [
        Vec3::new(-2.0, 0.5, 3.0),
        Vec3::new(4.0, -1.0, 0.0),
        Vec3::new(1.0, 7.5, -0.25),
        Vec3::new(0.0, 0.0, 0.0),
    ];
    let mut builder = MeshBuilder::new();
    for (idx, p) in points.iter().enumerate() {
        builder.add_vertex(format!("v{idx}"), p.x, p.y, p.z)?;
    }
    let mesh = builder.build();

    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }
    let size = max - min;
    let scale = size.x.max(size.y).max(size.z);

    let bounds = mesh.bounds().expect("non-empty mesh");
    assert_eq!(bounds, Bounds { min, max });
    assert_eq!(mesh.scale(), scale);
    assert_eq!(mesh.scale(), 8.5);
    Ok(())
}

#[test]
fn empty_mesh_has_no_bounds() {
    let mesh = MeshBuilder::new().build();
    assert!(mesh.is_empty());
    assert!(mesh.bounds().is_none());
    assert_eq!(mesh.scale(), 0.0);
}

#[test]
fn normal_segment_is_half_the_scale() -> Result<()> {
    let mesh = unit_square()?;
    let face = &mesh.faces()[0];
    let (start, end) = mesh.normal_segment(face);
    assert_vec_close(start, face.centroid());
    assert!((start.distance(end) - 0.5).abs() < EPS);
    Ok(())
}

#[test]
fn orientation_marker_follows_winding() -> Result<()> {
    let mesh = unit_square()?;
    let face = &mesh.faces()[0];
    let marker = mesh.orientation_marker(face);
    assert_eq!(marker.path.len(), 4);

    // 75% of the way from the centroid to corner "a", lifted along +Z.
    let lift = mesh.scale() * 0.001;
    assert_vec_close(marker.start(), Vec3::new(0.125, 0.125, lift));

    // The arrow tip sits on the third marked corner.
    assert_vec_close(marker.arrow[1], marker.path[2]);
    let base = (marker.arrow[0] + marker.arrow[2]) * 0.5;
    let direction = (marker.arrow[1] - base).normalized();
    let edge = (marker.path[2] - marker.path[1]).normalized();
    assert!((direction.dot(edge) - 1.0).abs() < 1.0e-6);
    Ok(())
}

#[test]
fn label_frame_lifts_by_scale_ratio() -> Result<()> {
    let mesh = unit_square()?;
    let face = &mesh.faces()[0];
    let frame = mesh.label_frame(face, LABEL_OFFSET_RATIO);
    assert_eq!(frame.rotation(), FrameRotation::Identity);
    assert!((frame.offset() - 0.01).abs() < EPS);
    assert_vec_close(frame.transform_point(Vec3::ZERO), Vec3::new(0.5, 0.5, 0.01));
    Ok(())
}

#[test]
fn tiny_faces_keep_their_normal() -> Result<()> {
    let s = 1.0e-10;
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 0.0, 0.0, 0.0)?;
    builder.add_vertex("b", s, 0.0, 0.0)?;
    builder.add_vertex("c", 0.0, s, 0.0)?;
    builder.add_face("speck", &["a", "b", "c"])?;
    let mesh = builder.build();
    assert_vec_close(mesh.faces()[0].normal(), Vec3::Z);
    Ok(())
}

#[test]
fn coincident_corners_stay_degenerate_at_any_scale() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", 1.0e-12, 0.0, 0.0)?;
    builder.add_vertex("b", 1.0e-12, 0.0, 0.0)?;
    builder.add_vertex("c", 0.0, 1.0e-12, 0.0)?;
    let err = builder.add_face("pinch", &["a", "b", "c"]).expect_err("a == b");
    assert!(matches!(err, Error::DegenerateFace { .. }));
    Ok(())
}

#[test]
fn many_faces_over_a_large_vertex_set() -> Result<()> {
    const RING: usize = 50_000;
    let mut builder = MeshBuilder::new();
    builder.add_vertex("hub", 0.0, 0.0, 0.0)?;
    for idx in 0..RING {
        let t = idx as f64 / RING as f64 * std::f64::consts::TAU;
        builder.add_vertex(format!("r{idx}"), t.cos(), t.sin(), 0.0)?;
    }
    for idx in 0..RING - 1 {
        let a = format!("r{idx}");
        let b = format!("r{}", idx + 1);
        builder.add_face(format!("f{idx}"), &["hub", a.as_str(), b.as_str()])?;
    }
    let mesh = builder.build();
    assert_eq!(mesh.faces().len(), RING - 1);
    assert!(mesh.faces().iter().all(|face| face.normal().z > 0.99));
    Ok(())
}
