mod support;

use cleaver::{Mesh, Plane, SplitConfig, SplitError};
use nalgebra::{Point3, Vector3};

#[test]
fn unit_cube_halves_along_y() {
    let cube = support::unit_cube_centered();
    let plane = Plane::from_point_normal(Point3::origin(), Vector3::y()).unwrap();

    let halves = cube.split(&plane).unwrap();

    assert!(halves.positive.is_manifold());
    assert!(halves.negative.is_manifold());
    assert!(support::approx_eq(halves.positive.volume(), 0.5, 1e-9));
    assert!(support::approx_eq(halves.negative.volume(), 0.5, 1e-9));

    // each half keeps half the lateral faces plus one full face, and gains a
    // unit-square cap: 0.5 * 4 + 1 + 1
    assert!(support::approx_eq(halves.positive.surface_area(), 4.0, 1e-9));
    assert!(support::approx_eq(halves.negative.surface_area(), 4.0, 1e-9));

    // the positive half lies entirely on the normal side
    let bb = halves.positive.bounding_box();
    assert!(bb.mins.y >= -1e-9);
    let bb = halves.negative.bounding_box();
    assert!(bb.maxs.y <= 1e-9);
}

#[test]
fn tilted_plane_preserves_volume() {
    let sphere = Mesh::sphere(1.0, 32, 16);
    let total = sphere.volume();
    let plane =
        Plane::from_point_normal(Point3::new(0.1, -0.05, 0.2), Vector3::new(1.0, 2.0, 3.0))
            .unwrap();

    let halves = sphere.split(&plane).unwrap();

    assert!(halves.positive.is_manifold());
    assert!(halves.negative.is_manifold());
    let sum = halves.positive.volume() + halves.negative.volume();
    assert!(support::approx_eq(sum, total, 1e-6));
    assert!(halves.positive.volume() > 0.0);
    assert!(halves.negative.volume() > 0.0);
}

#[test]
fn plane_outside_bounding_box_yields_one_empty_half() {
    let cube = support::unit_cube_centered();
    let plane = Plane::from_point_normal(Point3::new(0.0, 5.0, 0.0), Vector3::y()).unwrap();

    let halves = cube.split(&plane).unwrap();

    assert!(halves.positive.is_empty());
    assert!(support::approx_eq(halves.negative.volume(), 1.0, 1e-9));
    assert_eq!(halves.negative.triangle_count(), cube.triangle_count());
}

#[test]
fn plane_coplanar_with_a_face_ties_to_positive() {
    // cube sits on z=0; splitting there leaves everything on the normal side
    let cube = Mesh::cube(1.0);
    let plane = Plane::from_point_normal(Point3::origin(), Vector3::z()).unwrap();

    let halves = cube.split(&plane).unwrap();

    assert!(halves.negative.is_empty());
    assert!(support::approx_eq(halves.positive.volume(), 1.0, 1e-9));
}

#[test]
fn plane_grazing_a_face_leaves_the_mesh_whole() {
    // plane touches the top face from outside; nothing is cut, and the
    // grazed face stays with the half that holds the solid
    let cube = Mesh::cube(1.0);
    let plane = Plane::from_point_normal(Point3::new(0.0, 0.0, 1.0), Vector3::z()).unwrap();

    let halves = cube.split(&plane).unwrap();

    assert!(halves.positive.is_empty());
    assert!(halves.negative.is_manifold());
    assert_eq!(halves.negative.triangle_count(), cube.triangle_count());
    assert!(support::approx_eq(halves.negative.volume(), 1.0, 1e-9));
}

/// A 3 x 3 x 1 block with a 1 x 1 channel through the middle, so any
/// horizontal cross-section is an annulus.
fn square_tube() -> Mesh {
    let mut vertices = Vec::with_capacity(16);
    for &z in &[0.0, 1.0] {
        for &(x, y) in &[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)] {
            vertices.push(Point3::new(x, y, z));
        }
        for &(x, y) in &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)] {
            vertices.push(Point3::new(x, y, z));
        }
    }

    let quads: [[u32; 4]; 16] = [
        // outer walls
        [0, 1, 9, 8],
        [1, 2, 10, 9],
        [2, 3, 11, 10],
        [3, 0, 8, 11],
        // channel walls, facing into the channel
        [5, 4, 12, 13],
        [6, 5, 13, 14],
        [7, 6, 14, 15],
        [4, 7, 15, 12],
        // top rim
        [8, 9, 13, 12],
        [9, 10, 14, 13],
        [10, 11, 15, 14],
        [11, 8, 12, 15],
        // bottom rim
        [4, 5, 1, 0],
        [5, 6, 2, 1],
        [6, 7, 3, 2],
        [7, 4, 0, 3],
    ];
    let mut triangles = Vec::with_capacity(32);
    for [a, b, c, d] in quads {
        triangles.push([a, b, c]);
        triangles.push([a, c, d]);
    }
    Mesh::from_buffers(vertices, triangles).unwrap()
}

#[test]
fn annular_cross_section_caps_with_a_hole() {
    let tube = square_tube();
    assert!(tube.is_manifold());
    assert!(support::approx_eq(tube.volume(), 8.0, 1e-9));

    let plane = Plane::from_point_normal(Point3::new(0.0, 0.0, 0.5), Vector3::z()).unwrap();
    let halves = tube.split(&plane).unwrap();

    // each cap is an annulus: an outer cut loop with the channel loop as a
    // hole inside it
    assert!(halves.positive.is_manifold());
    assert!(halves.negative.is_manifold());
    assert!(support::approx_eq(halves.positive.volume(), 4.0, 1e-9));
    assert!(support::approx_eq(halves.negative.volume(), 4.0, 1e-9));
}

#[test]
fn merged_halves_reproduce_the_original_volume() {
    let sphere = Mesh::sphere(1.0, 24, 12);
    let total = sphere.volume();
    let plane = Plane::from_point_normal(Point3::origin(), Vector3::y()).unwrap();

    let halves = sphere.split(&plane).unwrap();

    // the two caps coincide with opposite orientation, so their signed
    // volume contributions cancel in the aggregate
    let rejoined = halves.positive.merge(&halves.negative);
    assert!(support::approx_eq(rejoined.volume(), total, 1e-6));
}

#[test]
fn double_split_decomposes_without_loss() {
    let cube = support::unit_cube_centered();
    let plane_y = Plane::from_point_normal(Point3::origin(), Vector3::y()).unwrap();
    let plane_x = Plane::from_point_normal(Point3::origin(), Vector3::x()).unwrap();

    let first = cube.split(&plane_y).unwrap();
    let quarters = [
        first.positive.split(&plane_x).unwrap(),
        first.negative.split(&plane_x).unwrap(),
    ];

    let mut sum = 0.0;
    for result in &quarters {
        for piece in [&result.positive, &result.negative] {
            assert!(piece.is_manifold());
            assert!(support::approx_eq(piece.volume(), 0.25, 1e-9));
            sum += piece.volume();
        }
    }
    assert!(support::approx_eq(sum, 1.0, 1e-9));
}

#[test]
fn disjoint_components_cut_into_multiple_loops() {
    let pair = Mesh::cube(1.0).merge(&Mesh::cube(1.0).translate(3.0, 0.0, 0.0));
    let plane = Plane::from_point_normal(Point3::new(0.0, 0.5, 0.0), Vector3::y()).unwrap();

    let halves = pair.split(&plane).unwrap();

    assert!(halves.positive.is_manifold());
    assert!(halves.negative.is_manifold());
    assert!(support::approx_eq(halves.positive.volume(), 1.0, 1e-9));
    assert!(support::approx_eq(halves.negative.volume(), 1.0, 1e-9));
}

#[test]
fn non_manifold_input_is_a_precondition_failure() {
    let mut soup = support::triangle_soup(&Mesh::cube(1.0));
    soup.pop();
    let broken = Mesh::from_triangle_soup(&soup);
    let plane = Plane::from_point_normal(Point3::new(0.0, 0.5, 0.0), Vector3::y()).unwrap();

    let err = broken.split(&plane).unwrap_err();
    assert!(matches!(err, SplitError::InvalidMesh(_)));
}

#[test]
fn missing_triangle_at_the_cut_reports_open_loop() {
    let cube = Mesh::cube(1.0);
    let plane = Plane::from_point_normal(Point3::new(0.0, 0.5, 0.0), Vector3::y()).unwrap();

    // remove one side triangle that straddles y = 0.5
    let soup: Vec<_> = support::triangle_soup(&cube)
        .into_iter()
        .filter(|tri| {
            let crosses = tri.iter().any(|p| p.y < 0.5) && tri.iter().any(|p| p.y > 0.5);
            let on_left_face = tri.iter().all(|p| p.x == 0.0);
            let has_corner = tri.iter().any(|p| p.y == 0.0 && p.z == 1.0);
            !(crosses && on_left_face && has_corner)
        })
        .collect();
    let broken = Mesh::from_triangle_soup(&soup);
    assert_eq!(broken.triangle_count(), cube.triangle_count() - 1);

    let config = SplitConfig {
        check_closed: false,
        ..SplitConfig::default()
    };
    let err = broken.split_with(&plane, &config).unwrap_err();
    match err {
        SplitError::OpenLoop { chains } => {
            assert!(!chains.is_empty());
            assert!(chains.iter().all(|chain| chain.len() >= 2));
        }
        other => panic!("expected OpenLoop, got {other:?}"),
    }
}

#[test]
fn plane_frame_round_trips_and_flips() {
    // z = 1.5 plane, normal given unnormalized
    let plane = Plane::from_normal(Vector3::new(0.0, 0.0, 2.0), 1.5).unwrap();
    assert!(support::approx_eq(plane.offset(), 1.5, 1e-12));

    let p = Point3::new(0.3, -0.7, 1.5);
    let (x, y) = plane.project(&p);
    assert!((plane.lift(x, y) - p).norm() < 1e-9);

    let flipped = plane.flipped();
    let q = Point3::origin();
    assert!(support::approx_eq(
        flipped.signed_distance(&q),
        -plane.signed_distance(&q),
        1e-12
    ));

    let mut back = flipped;
    back.flip();
    assert!(support::approx_eq(
        back.signed_distance(&p),
        plane.signed_distance(&p),
        1e-12
    ));
}

#[test]
fn zero_normal_is_degenerate() {
    let err = Plane::from_point_normal(Point3::origin(), Vector3::zeros()).unwrap_err();
    assert!(matches!(err, SplitError::DegenerateInput(_)));
}

#[test]
fn input_mesh_is_untouched() {
    let cube = support::unit_cube_centered();
    let before = cube.clone();
    let plane = Plane::from_point_normal(Point3::origin(), Vector3::y()).unwrap();

    let _ = cube.split(&plane).unwrap();

    assert_eq!(cube, before);
}
