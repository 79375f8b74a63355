//! Typed failures of the split operation

use crate::float_types::Real;
use nalgebra::Point3;

/// All the ways [`Mesh::split`](crate::mesh::Mesh::split) can fail.
///
/// `InvalidMesh` and `DegenerateInput` are precondition failures: they are
/// reported immediately and no partial result exists. `OpenLoop` is a
/// recoverable geometric failure; the caller may perturb the plane and retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    /// (InvalidMesh) The input mesh violates a precondition: an index triple
    /// is out of range or repeats a vertex, or the surface is not closed
    /// (some edge is not shared by exactly two consistently-wound triangles).
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// (DegenerateInput) The plane cannot be constructed: zero-length normal
    /// or non-finite parameters.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// (OpenLoop) The cut segments could not be chained into closed polygons,
    /// which indicates a non-manifold or degenerate intersection. Carries the
    /// open chains (as 3D polylines) for diagnostics.
    #[error("cut loop failed to close: {} open chain(s) left over", chains.len())]
    OpenLoop { chains: Vec<Vec<Point3<Real>>> },
}
