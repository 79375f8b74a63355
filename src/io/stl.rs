use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use std::io::Cursor;
use std::path::Path;

/// Outward facet normal, zero for degenerate triangles (STL readers accept
/// a zero normal and recompute).
fn facet_normal(tri: &[Point3<Real>; 3]) -> Vector3<Real> {
    let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
    let length = n.norm();
    if length > 0.0 { n / length } else { Vector3::zeros() }
}

impl Mesh {
    /// Convert this Mesh to an **ASCII STL** string with the given `name`.
    ///
    /// ```rust
    /// # use cleaver::mesh::Mesh;
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let mesh = Mesh::cube(1.0);
    /// let text = mesh.to_stl_ascii("my_solid");
    /// std::fs::write(std::env::temp_dir().join("my_solid.stl"), text)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("solid {name}\n"));

        for i in 0..self.triangle_count() {
            let tri = self.triangle_positions(i);
            let n = facet_normal(&tri);
            out.push_str(&format!(
                "  facet normal {:.6} {:.6} {:.6}\n",
                n.x, n.y, n.z
            ));
            out.push_str("    outer loop\n");
            for p in &tri {
                out.push_str(&format!(
                    "      vertex {:.6} {:.6} {:.6}\n",
                    p.x, p.y, p.z
                ));
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }

        out.push_str(&format!("endsolid {name}\n"));
        out
    }

    /// Convert this Mesh to a **binary STL** byte vector.
    ///
    /// The resulting `Vec<u8>` can be written to a file or handled in memory.
    pub fn to_stl_binary(&self) -> Result<Vec<u8>, IoError> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        let mut triangles = Vec::<Triangle>::with_capacity(self.triangle_count());
        for i in 0..self.triangle_count() {
            let tri = self.triangle_positions(i);
            let n = facet_normal(&tri);
            #[allow(clippy::unnecessary_cast)]
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            });
        }

        let mut cursor = Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }

    /// Parse an ASCII or binary STL held in memory into a Mesh, welding
    /// coincident facet corners into shared vertices.
    pub fn from_stl(bytes: &[u8]) -> Result<Mesh, IoError> {
        let mut cursor = Cursor::new(bytes);
        let stl = stl_io::read_stl(&mut cursor)?;

        let soup: Vec<[Point3<Real>; 3]> = stl
            .faces
            .iter()
            .map(|face| {
                face.vertices.map(|vi| {
                    let v = stl.vertices[vi];
                    #[allow(clippy::unnecessary_cast)]
                    Point3::new(v[0] as Real, v[1] as Real, v[2] as Real)
                })
            })
            .collect();

        let mesh = Mesh::from_triangle_soup(&soup);
        if mesh.is_empty() && !stl.faces.is_empty() {
            return Err(IoError::MalformedInput(
                "STL contained only degenerate facets".into(),
            ));
        }
        Ok(mesh)
    }

    /// Read an STL file from `path` into a Mesh.
    pub fn from_stl_file(path: impl AsRef<Path>) -> Result<Mesh, IoError> {
        let bytes = std::fs::read(path)?;
        Self::from_stl(&bytes)
    }
}
