//! Splitting a closed mesh along a plane into two capped, watertight halves.
//!
//! The pipeline is a single consistent re-triangulation: classify vertices by
//! signed distance, clip straddling triangles while recording oriented cut
//! segments, chain the segments into closed loops, ear-clip the loops in the
//! plane's 2D frame, and weld each half (sliced triangles plus cap) into its
//! own mesh. No boolean operations are involved.

mod cap;
mod chain;

use crate::errors::SplitError;
use crate::float_types::{EPSILON, Real, relative_tolerance};
use crate::mesh::Mesh;
use crate::plane::Plane;
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The two closed halves produced by [`Mesh::split`]. An explicit struct
/// rather than a tuple so the sides cannot be swapped silently.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// The half on the normal side of the plane (signed distance ≥ 0).
    pub positive: Mesh,
    /// The half behind the plane (signed distance ≤ 0).
    pub negative: Mesh,
}

/// Tuning knobs for [`Mesh::split_with`].
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    /// Coincidence tolerance as a fraction of the mesh bounding-box
    /// diagonal. All on-plane tests, segment chaining and boundary welding
    /// use the resulting absolute epsilon.
    pub relative_tolerance: Real,

    /// Verify the closed-manifold precondition before cutting. Disabling
    /// this skips the `InvalidMesh` check; a defective mesh then surfaces as
    /// [`SplitError::OpenLoop`] when the cut crosses the defect.
    pub check_closed: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            relative_tolerance: relative_tolerance(),
            check_closed: true,
        }
    }
}

/// Which side of the plane a vertex lies on, within epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Positive,
    Negative,
    Coplanar,
}

/// One oriented segment of the cut, ordered as traversed by the boundary of
/// the positive-side region. Chained head-to-tail into loops.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CutSegment {
    pub from: Point3<Real>,
    pub to: Point3<Real>,
}

impl Mesh {
    /// Split this closed mesh by `plane` into two closed halves, each capped
    /// with a flat patch at the cut. The input mesh is never mutated.
    ///
    /// ## Errors
    /// - [`SplitError::InvalidMesh`] if the mesh is not closed and manifold
    /// - [`SplitError::OpenLoop`] if the cut segments cannot be chained into
    ///   closed polygons (degenerate intersection); the caller may perturb
    ///   the plane and retry
    ///
    /// A plane that misses the mesh entirely is not an error: one half is
    /// the whole mesh and the other is empty, with no cap.
    pub fn split(&self, plane: &Plane) -> Result<SplitResult, SplitError> {
        self.split_with(plane, &SplitConfig::default())
    }

    /// [`Mesh::split`] with explicit tolerances.
    pub fn split_with(
        &self,
        plane: &Plane,
        config: &SplitConfig,
    ) -> Result<SplitResult, SplitError> {
        if config.check_closed {
            if let Some(defect) = self.closedness_defect() {
                return Err(SplitError::InvalidMesh(defect));
            }
        }

        let eps = (config.relative_tolerance * self.bounding_box().diagonal()).max(EPSILON);

        // 1. classify every vertex by signed distance to the plane
        #[cfg(feature = "parallel")]
        let distances: Vec<Real> = self
            .vertices
            .par_iter()
            .map(|p| plane.signed_distance(p))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let distances: Vec<Real> = self
            .vertices
            .iter()
            .map(|p| plane.signed_distance(p))
            .collect();

        let side_of = |idx: u32| -> Side {
            let d = distances[idx as usize];
            if d > eps {
                Side::Positive
            } else if d < -eps {
                Side::Negative
            } else {
                Side::Coplanar
            }
        };

        let mut positive: Vec<[Point3<Real>; 3]> = Vec::new();
        let mut negative: Vec<[Point3<Real>; 3]> = Vec::new();
        let mut segments: Vec<CutSegment> = Vec::new();

        // Crossing points are cached per undirected mesh edge so the two
        // triangles sharing an edge receive the bit-identical point; welding
        // the halves back to watertight depends on this.
        let mut crossings: HashMap<(u32, u32), Point3<Real>> = HashMap::new();

        // On-plane edges of positive and negative triangles; an edge present
        // on both sides is part of the cut boundary.
        let mut coplanar_pos: HashMap<(u32, u32), (u32, u32)> = HashMap::new();
        let mut coplanar_neg: HashSet<(u32, u32)> = HashSet::new();

        // Triangles lying entirely on the plane, held back until the scan
        // shows which side the surrounding solid occupies.
        let mut on_plane: Vec<[Point3<Real>; 3]> = Vec::new();
        let mut on_plane_edges: Vec<((u32, u32), (u32, u32))> = Vec::new();

        for tri in &self.triangles {
            let sides = [side_of(tri[0]), side_of(tri[1]), side_of(tri[2])];
            let pos = sides.iter().filter(|&&s| s == Side::Positive).count();
            let neg = sides.iter().filter(|&&s| s == Side::Negative).count();

            if pos > 0 && neg > 0 {
                self.clip_triangle(
                    tri,
                    &sides,
                    &distances,
                    &mut crossings,
                    &mut positive,
                    &mut negative,
                    &mut segments,
                );
                continue;
            }

            // 2. triangles fully on one side are copied unchanged
            let corners = [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ];
            if pos == 0 && neg == 0 {
                on_plane.push(corners);
                for k in 0..3 {
                    let (a, b) = (tri[k], tri[(k + 1) % 3]);
                    let key = if a < b { (a, b) } else { (b, a) };
                    on_plane_edges.push((key, (a, b)));
                }
                continue;
            }
            if neg == 0 {
                positive.push(corners);
            } else {
                negative.push(corners);
            }

            // an edge lying exactly on the plane may bound the cut loop
            if pos + neg == 1 {
                for k in 0..3 {
                    let (a, b) = (tri[k], tri[(k + 1) % 3]);
                    if side_of(a) == Side::Coplanar && side_of(b) == Side::Coplanar {
                        let key = if a < b { (a, b) } else { (b, a) };
                        if neg == 0 {
                            coplanar_pos.insert(key, (a, b));
                        } else {
                            coplanar_neg.insert(key);
                        }
                    }
                }
            }
        }

        // A plane that merely grazes the surface along coplanar faces does
        // not cut; the grazed faces stay with the half holding the solid.
        // Otherwise they tie-break to the positive half, and their edges
        // bound the cut wherever negative material meets them.
        if !on_plane.is_empty() {
            if positive.is_empty() && !negative.is_empty() {
                negative.append(&mut on_plane);
            } else {
                positive.append(&mut on_plane);
                for (key, edge) in on_plane_edges {
                    coplanar_pos.insert(key, edge);
                }
            }
        }

        // on-plane edges shared between the two sides join the cut,
        // oriented as the positive triangle traverses them
        for (key, (a, b)) in coplanar_pos {
            if coplanar_neg.contains(&key) {
                segments.push(CutSegment {
                    from: self.vertices[a as usize],
                    to: self.vertices[b as usize],
                });
            }
        }

        // 3.-5. chain the cut into loops, triangulate the cap, orient one
        // copy per half so both halves close with outward normals
        if !segments.is_empty() {
            let loops = chain::chain_segments(&segments, eps)?;
            let cap = cap::triangulate_loops(plane, &loops, eps);
            for tri in &cap {
                // counter-clockwise in the plane frame => normal +n, which
                // faces out of the negative half
                negative.push(*tri);
                positive.push([tri[0], tri[2], tri[1]]);
            }
        }

        Ok(SplitResult {
            positive: Mesh::weld(&positive, eps),
            negative: Mesh::weld(&negative, eps),
        })
    }

    /// Clip one straddling triangle: distribute its corners and edge
    /// crossings to both sides, fan the resulting sub-polygons, and record
    /// the oriented cut segment.
    #[allow(clippy::too_many_arguments)]
    fn clip_triangle(
        &self,
        tri: &[u32; 3],
        sides: &[Side; 3],
        distances: &[Real],
        crossings: &mut HashMap<(u32, u32), Point3<Real>>,
        positive: &mut Vec<[Point3<Real>; 3]>,
        negative: &mut Vec<[Point3<Real>; 3]>,
        segments: &mut Vec<CutSegment>,
    ) {
        // sub-polygons on each side; a triangle never yields more than a quad
        let mut pos_poly: Vec<Point3<Real>> = Vec::with_capacity(4);
        let mut neg_poly: Vec<Point3<Real>> = Vec::with_capacity(4);

        // the cut segment runs from where the positive region ends (a
        // crossing out of it) to where it begins again
        let mut seg_from: Option<Point3<Real>> = None;
        let mut seg_to: Option<Point3<Real>> = None;

        for k in 0..3 {
            let i = tri[k];
            let j = tri[(k + 1) % 3];
            let pi = self.vertices[i as usize];
            let (si, sj) = (sides[k], sides[(k + 1) % 3]);

            match si {
                Side::Positive => pos_poly.push(pi),
                Side::Negative => neg_poly.push(pi),
                Side::Coplanar => {
                    pos_poly.push(pi);
                    neg_poly.push(pi);
                }
            }

            match (si, sj) {
                (Side::Positive, Side::Negative) | (Side::Negative, Side::Positive) => {
                    // canonical per-edge interpolation, shared by both
                    // incident triangles
                    let key = if i < j { (i, j) } else { (j, i) };
                    let x = *crossings.entry(key).or_insert_with(|| {
                        let (a, b) = (key.0 as usize, key.1 as usize);
                        let (da, db) = (distances[a], distances[b]);
                        let t = da / (da - db);
                        self.vertices[a] + (self.vertices[b] - self.vertices[a]) * t
                    });
                    pos_poly.push(x);
                    neg_poly.push(x);
                    if si == Side::Positive {
                        seg_from = Some(x);
                    } else {
                        seg_to = Some(x);
                    }
                }
                (Side::Positive, Side::Coplanar) => {
                    seg_from = Some(self.vertices[j as usize]);
                }
                (Side::Coplanar, Side::Positive) => {
                    seg_to = Some(pi);
                }
                _ => {}
            }
        }

        if pos_poly.len() >= 3 {
            for k in 1..pos_poly.len() - 1 {
                positive.push([pos_poly[0], pos_poly[k], pos_poly[k + 1]]);
            }
        }
        if neg_poly.len() >= 3 {
            for k in 1..neg_poly.len() - 1 {
                negative.push([neg_poly[0], neg_poly[k], neg_poly[k + 1]]);
            }
        }

        if let (Some(from), Some(to)) = (seg_from, seg_to) {
            segments.push(CutSegment { from, to });
        }
    }
}
