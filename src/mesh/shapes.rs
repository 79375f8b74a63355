//! 3D shape constructors with shared-vertex storage

use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use nalgebra::Point3;
use std::sync::OnceLock;

impl Mesh {
    /// An axis-aligned cuboid with one corner at the origin and the opposite
    /// corner at `(width, length, height)`.
    ///
    /// Eight shared vertices, twelve triangles, wound counter-clockwise seen
    /// from outside:
    /// ```text
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    pub fn cuboid(width: Real, length: Real, height: Real) -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),          // 0: origin
            Point3::new(width, 0.0, 0.0),        // 1: +X
            Point3::new(width, length, 0.0),     // 2: +X+Y
            Point3::new(0.0, length, 0.0),       // 3: +Y
            Point3::new(0.0, 0.0, height),       // 4: +Z
            Point3::new(width, 0.0, height),     // 5: +X+Z
            Point3::new(width, length, height),  // 6: +X+Y+Z
            Point3::new(0.0, length, height),    // 7: +Y+Z
        ];

        // Quad faces in outward winding, fanned into two triangles each
        let faces: [[u32; 4]; 6] = [
            [0, 3, 2, 1], // bottom (-Z)
            [4, 5, 6, 7], // top (+Z)
            [0, 1, 5, 4], // front (-Y)
            [3, 7, 6, 2], // back (+Y)
            [0, 4, 7, 3], // left (-X)
            [1, 2, 6, 5], // right (+X)
        ];

        let mut triangles = Vec::with_capacity(12);
        for [a, b, c, d] in faces {
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }

        Mesh {
            vertices,
            triangles,
            bounding_box: OnceLock::new(),
        }
    }

    /// A cube of the given edge `width` with one corner at the origin.
    pub fn cube(width: Real) -> Mesh {
        Self::cuboid(width, width, width)
    }

    /// A UV sphere of the given `radius` centered at the origin, built from
    /// `segments` longitudinal slices and `stacks` latitudinal bands. Pole
    /// bands produce triangles, the rest quads split in two.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> Mesh {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let point_at = |stack: usize, segment: usize| -> Point3<Real> {
            let theta = PI * stack as Real / stacks as Real;
            let phi = TAU * segment as Real / segments as Real;
            Point3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            )
        };

        let mut soup: Vec<[Point3<Real>; 3]> = Vec::with_capacity(2 * segments * stacks);
        for stack in 0..stacks {
            for segment in 0..segments {
                let p00 = point_at(stack, segment);
                let p01 = point_at(stack, segment + 1);
                let p10 = point_at(stack + 1, segment);
                let p11 = point_at(stack + 1, segment + 1);

                if stack > 0 {
                    soup.push([p00, p10, p01]);
                }
                if stack + 1 < stacks {
                    soup.push([p01, p10, p11]);
                }
            }
        }

        Mesh::from_triangle_soup(&soup)
    }
}
