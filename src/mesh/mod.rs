//! `Mesh` struct: a deduplicated vertex buffer plus triangle index triples.

use crate::errors::SplitError;
use crate::float_types::Real;
use hashbrown::HashMap;
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::sync::OnceLock;

pub mod manifold;
pub mod shapes;

/// Axis-aligned bounding box spanning a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    /// Length of the box diagonal; zero for an empty mesh.
    pub fn diagonal(&self) -> Real {
        (self.maxs - self.mins).norm()
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }
}

/// A triangle mesh with shared vertex storage.
///
/// Invariant: every index triple references three distinct valid vertex
/// indices. Meshes fed to [`Mesh::split`](crate::mesh::Mesh::split) are
/// additionally assumed closed and manifold; that precondition is checked
/// there, not here.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Deduplicated vertex positions.
    pub vertices: Vec<Point3<Real>>,

    /// Index triples into `vertices`, wound counter-clockwise seen from
    /// outside the solid.
    pub triangles: Vec<[u32; 3]>,

    /// Lazily calculated AABB that spans `vertices`.
    bounding_box: OnceLock<Aabb>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.triangles == other.triangles
    }
}

impl Mesh {
    /// Returns a new empty Mesh
    pub fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            triangles: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a Mesh from prepared buffers, validating every index triple.
    ///
    /// ## Errors
    /// [`SplitError::InvalidMesh`] if a triple references an out-of-range
    /// index or repeats a vertex.
    pub fn from_buffers(
        vertices: Vec<Point3<Real>>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, SplitError> {
        let vertex_count = vertices.len();
        for (i, tri) in triangles.iter().enumerate() {
            if tri.iter().any(|&idx| idx as usize >= vertex_count) {
                return Err(SplitError::InvalidMesh(format!(
                    "triangle {i} references vertex index out of range (vertex count {vertex_count})"
                )));
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
                return Err(SplitError::InvalidMesh(format!(
                    "triangle {i} repeats a vertex index ({}, {}, {})",
                    tri[0], tri[1], tri[2]
                )));
            }
        }
        Ok(Mesh {
            vertices,
            triangles,
            bounding_box: OnceLock::new(),
        })
    }

    /// Build a Mesh from a triangle soup, welding corners that coincide
    /// within `relative_tolerance() ×` the soup's bounding-box diagonal.
    /// Triangles that collapse under welding are dropped.
    pub fn from_triangle_soup(triangles: &[[Point3<Real>; 3]]) -> Self {
        let mut diagonal: Real = 0.0;
        if !triangles.is_empty() {
            let mut mins = triangles[0][0];
            let mut maxs = triangles[0][0];
            for tri in triangles {
                for p in tri {
                    mins = mins.inf(p);
                    maxs = maxs.sup(p);
                }
            }
            diagonal = (maxs - mins).norm();
        }
        let eps =
            (crate::float_types::relative_tolerance() * diagonal).max(crate::float_types::EPSILON);
        Self::weld(triangles, eps)
    }

    /// Weld a triangle soup into shared-vertex storage, merging corners that
    /// fall into the same `eps`-sized quantization cell. Degenerate triangles
    /// (two corners welded together) are dropped.
    pub(crate) fn weld(triangles: &[[Point3<Real>; 3]], eps: Real) -> Self {
        let quantize = |p: &Point3<Real>| -> (i64, i64, i64) {
            (
                (p.x / eps).round() as i64,
                (p.y / eps).round() as i64,
                (p.z / eps).round() as i64,
            )
        };

        let mut index_of: HashMap<(i64, i64, i64), u32> = HashMap::new();
        let mut vertices: Vec<Point3<Real>> = Vec::new();
        let mut indexed: Vec<[u32; 3]> = Vec::with_capacity(triangles.len());

        for tri in triangles {
            let mut idx = [0u32; 3];
            for (slot, p) in idx.iter_mut().zip(tri.iter()) {
                *slot = *index_of.entry(quantize(p)).or_insert_with(|| {
                    vertices.push(*p);
                    (vertices.len() - 1) as u32
                });
            }
            if idx[0] != idx[1] && idx[1] != idx[2] && idx[2] != idx[0] {
                indexed.push(idx);
            }
        }

        Mesh {
            vertices,
            triangles: indexed,
            bounding_box: OnceLock::new(),
        }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// `true` when the mesh holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The three corner positions of triangle `i`.
    pub fn triangle_positions(&self, i: usize) -> [Point3<Real>; 3] {
        let [a, b, c] = self.triangles[i];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all vertices.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            // If there are no vertices, return a trivial AABB at the origin
            let Some(first) = self.vertices.first() else {
                return Aabb {
                    mins: Point3::origin(),
                    maxs: Point3::origin(),
                };
            };

            let mut mins = *first;
            let mut maxs = *first;
            for p in &self.vertices {
                mins = mins.inf(p);
                maxs = maxs.sup(p);
            }
            Aabb { mins, maxs }
        })
    }

    /// Enclosed volume via the divergence theorem: the sum of signed
    /// origin-tetrahedron volumes `a · (b × c) / 6`. Exact for closed meshes
    /// with outward winding; positive when the winding is outward.
    pub fn volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let a = self.vertices[a as usize].coords;
                let b = self.vertices[b as usize].coords;
                let c = self.vertices[c as usize].coords;
                a.dot(&b.cross(&c))
            })
            .sum::<Real>()
            / 6.0
    }

    /// Total surface area of all triangles.
    pub fn surface_area(&self) -> Real {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let a = self.vertices[a as usize];
                let b = self.vertices[b as usize];
                let c = self.vertices[c as usize];
                (b - a).cross(&(c - a)).norm()
            })
            .sum::<Real>()
            / 2.0
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let mut mesh = self.clone();
        for p in &mut mesh.vertices {
            *p = mat.transform_point(p);
        }
        // invalidate the old cached bounding box
        mesh.bounding_box = OnceLock::new();
        mesh
    }

    /// Returns a new Mesh translated by `vector`.
    pub fn translate_vector(&self, vector: Vector3<Real>) -> Mesh {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Mesh translated by x, y, and z.
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Mesh {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Mesh translated so that its bounding-box center is at
    /// the origin.
    pub fn center(&self) -> Mesh {
        let aabb = self.bounding_box();
        let center = aabb.center();
        self.translate(-center.x, -center.y, -center.z)
    }

    /// Rotates the Mesh by x, y, z degrees, composed as `Rz * Ry * Rx`.
    pub fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Mesh {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Scales the Mesh by scale_x, scale_y, scale_z about the origin.
    pub fn scale(&self, sx: Real, sy: Real, sz: Real) -> Mesh {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Concatenate two meshes into one buffer, welding coincident vertices.
    ///
    /// This is plain aggregation, not a boolean union: overlapping volumes
    /// keep their interior faces.
    pub fn merge(&self, other: &Mesh) -> Mesh {
        let soup: Vec<[Point3<Real>; 3]> = (0..self.triangle_count())
            .map(|i| self.triangle_positions(i))
            .chain((0..other.triangle_count()).map(|i| other.triangle_positions(i)))
            .collect();
        Mesh::from_triangle_soup(&soup)
    }
}
