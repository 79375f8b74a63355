use crate::float_types::Real;
use crate::mesh::Mesh;
use hashbrown::HashMap;
use nalgebra::Point3;

impl Mesh {
    /// Checks if the Mesh is closed and manifold
    ///
    /// ### Returns
    /// Returns `true` if every edge is shared by exactly two triangles with
    /// opposite traversal directions (consistent outward winding).
    ///
    /// ### Notes:
    /// - Vertices are quantized before edge counting, so positions that are
    ///   duplicated in the buffer still count as the same edge endpoint.
    pub fn is_manifold(&self) -> bool {
        self.closedness_defect().is_none()
    }

    /// Returns a description of the first closedness/orientation defect, or
    /// `None` for a closed, consistently wound surface. Used as the
    /// precondition check of [`Mesh::split`](crate::mesh::Mesh::split).
    pub(crate) fn closedness_defect(&self) -> Option<String> {
        const QUANTIZATION_FACTOR: Real = 1e7;

        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        struct QuantizedPoint(i64, i64, i64);

        fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
            QuantizedPoint(
                (p.x * QUANTIZATION_FACTOR).round() as i64,
                (p.y * QUANTIZATION_FACTOR).round() as i64,
                (p.z * QUANTIZATION_FACTOR).round() as i64,
            )
        }

        // (incidence count, traversal-direction balance) per undirected edge
        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), (u32, i32)> =
            HashMap::new();

        for tri in &self.triangles {
            for &(i0, i1) in &[(0, 1), (1, 2), (2, 0)] {
                let p0 = quantize_point(&self.vertices[tri[i0] as usize]);
                let p1 = quantize_point(&self.vertices[tri[i1] as usize]);

                // Order them so (p0, p1) and (p1, p0) become the same key
                let forward = (p0.0, p0.1, p0.2) < (p1.0, p1.1, p1.2);
                let key = if forward { (p0, p1) } else { (p1, p0) };

                let entry = edge_counts.entry(key).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += if forward { 1 } else { -1 };
            }
        }

        // For a perfectly closed manifold surface (with no boundary), each
        // edge appears exactly twice, once in each direction.
        let defective = edge_counts
            .values()
            .filter(|&&(count, balance)| count != 2 || balance != 0)
            .count();
        if defective == 0 {
            None
        } else {
            Some(format!(
                "{defective} of {} edges are not shared by exactly two consistently wound triangles",
                edge_counts.len()
            ))
        }
    }
}
