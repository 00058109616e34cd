use meshcheck_base::Result;
use meshcheck_camera::Camera;
use meshcheck_geometry::{Mesh, MeshBuilder};
use meshcheck_view::ViewerConfig;
use meshcheck_view::viewer::{
    OverlayCollector, OverlayShape, Point2, Rect, Vec2, face_shades, paint_scene,
};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn square(winding: [&str; 4]) -> Result<Mesh> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("a", -0.5, -0.5, 0.0)?;
    builder.add_vertex("b", 0.5, -0.5, 0.0)?;
    builder.add_vertex("c", 0.5, 0.5, 0.0)?;
    builder.add_vertex("d", -0.5, 0.5, 0.0)?;
    builder.add_face("square", &winding)?;
    Ok(builder.build())
}

fn camera_for(mesh: &Mesh) -> Camera {
    let mut camera = Camera::default();
    camera.fit_scale(mesh.scale(), 4.0);
    camera.set_viewport(WIDTH, HEIGHT);
    camera
}

fn viewport() -> Rect {
    Rect::from_min_size(Point2::new(0.0, 0.0), Vec2::new(WIDTH, HEIGHT))
}

fn paint(mesh: Option<&Mesh>, camera: &Camera, config: &ViewerConfig) -> OverlayCollector {
    let mut collector = OverlayCollector::default();
    paint_scene(&mut collector, viewport(), mesh, camera, config);
    collector
}

/// Opaque polygons are face fills; the winding arrow is translucent.
fn fills(collector: &OverlayCollector) -> Vec<meshcheck_view::viewer::Color32> {
    collector
        .polygons()
        .filter(|(_, fill)| fill.a == 255)
        .map(|(_, fill)| fill)
        .collect()
}

#[test]
fn empty_scene_draws_background_and_axes() {
    let mut camera = Camera::default();
    camera.set_viewport(WIDTH, HEIGHT);
    let collector = paint(None, &camera, &ViewerConfig::default());

    match collector.shapes.first() {
        Some(OverlayShape::Gradient { rect, top, bottom }) => {
            assert_eq!(*rect, viewport());
            assert!(top.r > bottom.r, "lighter grey at the top");
        }
        other => panic!("background first, got {other:?}"),
    }
    assert_eq!(collector.lines().count(), 3);
    assert_eq!(collector.polygons().count(), 0);
    assert_eq!(collector.texts().collect::<Vec<_>>(), vec!["Drop a mesh file here"]);
}

#[test]
fn axes_can_be_hidden() {
    let mut camera = Camera::default();
    camera.set_viewport(WIDTH, HEIGHT);
    let mut config = ViewerConfig::default();
    config.display.axes = false;
    let collector = paint(None, &camera, &config);
    assert_eq!(collector.lines().count(), 0);
}

#[test]
fn front_square_is_filled_with_two_triangles() -> Result<()> {
    let mesh = square(["a", "b", "c", "d"])?;
    let camera = camera_for(&mesh);
    let collector = paint(Some(&mesh), &camera, &ViewerConfig::default());

    let fills = fills(&collector);
    assert_eq!(fills.len(), 2);
    for fill in &fills {
        assert!(fill.b > fill.r, "front faces use the cool base colour");
    }
    // The winding arrow follows the fills.
    assert_eq!(collector.polygons().count(), 3);

    // Every fill corner lands inside the viewport.
    for (points, _) in collector.polygons() {
        for point in points {
            assert!(viewport().contains(*point), "{point:?}");
        }
    }
    Ok(())
}

#[test]
fn back_faces_are_culled_but_keep_their_normal() -> Result<()> {
    let mesh = square(["a", "d", "c", "b"])?;
    let camera = camera_for(&mesh);
    let collector = paint(Some(&mesh), &camera, &ViewerConfig::default());

    assert_eq!(collector.polygons().count(), 0);
    let normals = collector
        .lines()
        .filter(|(_, _, stroke)| stroke.width == 2.0)
        .count();
    assert_eq!(normals, 1);
    assert!(!collector.texts().any(|text| text == "square"));
    Ok(())
}

#[test]
fn back_faces_are_tinted_when_culling_is_off() -> Result<()> {
    let mesh = square(["a", "d", "c", "b"])?;
    let camera = camera_for(&mesh);
    let mut config = ViewerConfig::default();
    config.display.cull_back_faces = false;
    let collector = paint(Some(&mesh), &camera, &config);

    let fills = fills(&collector);
    assert_eq!(fills.len(), 2);
    for fill in &fills {
        assert!(fill.r > fill.b, "back faces use the warning tint");
    }
    Ok(())
}

#[test]
fn labels_name_faces_and_vertices() -> Result<()> {
    let mesh = square(["a", "b", "c", "d"])?;
    let camera = camera_for(&mesh);
    let collector = paint(Some(&mesh), &camera, &ViewerConfig::default());

    let texts: Vec<&str> = collector.texts().collect();
    for name in ["square", "a", "b", "c", "d"] {
        assert!(texts.contains(&name), "missing label {name}");
    }

    let mut config = ViewerConfig::default();
    config.display.face_labels = false;
    config.display.vertex_labels = false;
    let collector = paint(Some(&mesh), &camera, &config);
    assert_eq!(collector.texts().count(), 0);
    Ok(())
}

#[test]
fn face_label_is_upright_for_a_face_towards_the_camera() -> Result<()> {
    let mesh = square(["a", "b", "c", "d"])?;
    let camera = camera_for(&mesh);
    let collector = paint(Some(&mesh), &camera, &ViewerConfig::default());

    let label = collector.shapes.iter().find_map(|shape| match shape {
        OverlayShape::RotatedText {
            center,
            angle,
            text,
            size,
            ..
        } if text == "square" => Some((*center, *angle, *size)),
        _ => None,
    });
    let (center, angle, size) = label.expect("face label drawn");
    assert!(angle.abs() < 1.0e-3, "angle {angle}");
    assert!((center.x - WIDTH * 0.5).abs() < 1.0);
    assert!((center.y - HEIGHT * 0.5).abs() < 1.0);
    let labels = ViewerConfig::default().labels;
    assert!(size >= labels.face_min_size && size <= labels.face_max_size);
    Ok(())
}

#[test]
fn shades_darken_along_the_fan() -> Result<()> {
    let mut builder = MeshBuilder::new();
    let names = ["p0", "p1", "p2", "p3", "p4"];
    for (idx, name) in names.iter().enumerate() {
        let t = idx as f64 / 5.0 * std::f64::consts::TAU;
        builder.add_vertex(*name, t.cos(), t.sin(), 0.0)?;
    }
    builder.add_face("pent", &names)?;
    let mesh = builder.build();
    let camera = camera_for(&mesh);

    let shades = face_shades(&mesh, &camera);
    assert_eq!(shades.len(), 1);
    let shade = &shades[0];
    assert!(shade.front);
    assert_eq!(shade.triangles.len(), 3);
    for pair in shade.triangles.windows(2) {
        assert!(pair[1].r <= pair[0].r);
        assert!(pair[1].g < pair[0].g);
        assert!(pair[1].b < pair[0].b);
    }
    Ok(())
}

#[test]
fn faces_are_painted_far_to_near() -> Result<()> {
    let mut builder = MeshBuilder::new();
    builder.add_vertex("n0", -0.5, -0.5, 1.0)?;
    builder.add_vertex("n1", 0.5, -0.5, 1.0)?;
    builder.add_vertex("n2", 0.0, 0.5, 1.0)?;
    builder.add_vertex("f0", -0.5, -0.5, -1.0)?;
    builder.add_vertex("f1", 0.5, -0.5, -1.0)?;
    builder.add_vertex("f2", 0.0, 0.5, -1.0)?;
    builder.add_face("near", &["n0", "n1", "n2"])?;
    builder.add_face("far", &["f0", "f1", "f2"])?;
    let mesh = builder.build();
    let camera = camera_for(&mesh);
    let collector = paint(Some(&mesh), &camera, &ViewerConfig::default());

    let order: Vec<&str> = collector
        .texts()
        .filter(|text| *text == "near" || *text == "far")
        .collect();
    assert_eq!(order, vec!["far", "near"]);
    Ok(())
}
