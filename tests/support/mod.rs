//! Test support library
//! Provides various helper functions & utilities for tests.

use cleaver::Mesh;
use cleaver::float_types::Real;
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// The triangles of `mesh` as a position soup, for rebuilding broken
/// variants of a valid mesh.
pub fn triangle_soup(mesh: &Mesh) -> Vec<[Point3<Real>; 3]> {
    (0..mesh.triangle_count())
        .map(|i| mesh.triangle_positions(i))
        .collect()
}

/// A unit cube centered at the origin.
pub fn unit_cube_centered() -> Mesh {
    Mesh::cube(1.0).center()
}
