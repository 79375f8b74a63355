#![cfg(feature = "stl-io")]

mod support;

use cleaver::Mesh;

#[test]
fn ascii_export_shape() {
    let cube = Mesh::cube(1.0);
    let text = cube.to_stl_ascii("unit_cube");

    assert!(text.starts_with("solid unit_cube\n"));
    assert!(text.trim_end().ends_with("endsolid unit_cube"));
    assert_eq!(text.matches("facet normal").count(), 12);
    assert_eq!(text.matches("vertex").count(), 36);
}

#[test]
fn binary_round_trip_preserves_geometry() {
    let sphere = Mesh::sphere(1.0, 16, 8);
    let bytes = sphere.to_stl_binary().unwrap();

    let reread = Mesh::from_stl(&bytes).unwrap();
    assert_eq!(reread.triangle_count(), sphere.triangle_count());
    assert!(reread.is_manifold());
    // f32 quantization on the wire
    assert!(support::approx_eq(reread.volume(), sphere.volume(), 1e-4));
}

#[test]
fn ascii_round_trip_parses_own_output() {
    let cube = Mesh::cube(1.0);
    let text = cube.to_stl_ascii("cube");

    let reread = Mesh::from_stl(text.as_bytes()).unwrap();
    assert_eq!(reread.triangle_count(), 12);
    assert!(support::approx_eq(reread.volume(), 1.0, 1e-4));
}

#[test]
fn split_halves_survive_export() {
    use cleaver::Plane;
    use nalgebra::{Point3, Vector3};

    let cube = Mesh::cube(1.0).center();
    let plane = Plane::from_point_normal(Point3::origin(), Vector3::y()).unwrap();
    let halves = cube.split(&plane).unwrap();

    let bytes = halves.positive.to_stl_binary().unwrap();
    let reread = Mesh::from_stl(&bytes).unwrap();
    assert!(reread.is_manifold());
    assert!(support::approx_eq(reread.volume(), 0.5, 1e-4));
}
