//! Cap construction: project cut loops into the plane frame, group them into
//! outer rings and holes, ear-clip, and lift the triangles back to 3D.

use crate::float_types::Real;
use crate::plane::Plane;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use hashbrown::HashMap;
use nalgebra::Point3;

/// One projected cut loop.
struct Ring {
    /// Plane-frame coordinates, one per loop point, not closed.
    coords: Vec<Coord<Real>>,
    /// Shoelace area; positive for counter-clockwise in the frame.
    area: Real,
    /// How many other rings contain this one.
    depth: usize,
}

/// Triangulate the closed cut loops into a flat patch lying on `plane`.
///
/// Returned triangles are wound counter-clockwise in the plane's `(u, v)`
/// frame, so their 3D normal is `+n`. Corner positions are snapped back to
/// the exact 3D loop points so the cap welds cleanly onto the sliced halves.
pub(crate) fn triangulate_loops(
    plane: &Plane,
    loops: &[Vec<Point3<Real>>],
    eps: Real,
) -> Vec<[Point3<Real>; 3]> {
    let (u, v) = plane.basis();

    // frame coordinate -> original 3D point, for snapping earcut output back
    let quantize = |c: &Coord<Real>| -> (i64, i64) {
        ((c.x / eps).round() as i64, (c.y / eps).round() as i64)
    };
    let mut snap: HashMap<(i64, i64), Point3<Real>> = HashMap::new();

    let mut rings: Vec<Ring> = Vec::new();
    for poly in loops {
        let coords: Vec<Coord<Real>> = poly
            .iter()
            .map(|p| Coord {
                x: u.dot(&p.coords),
                y: v.dot(&p.coords),
            })
            .collect();
        for (c, p) in coords.iter().zip(poly.iter()) {
            snap.insert(quantize(c), *p);
        }

        let area = shoelace_area(&coords);
        if area.abs() < eps * eps {
            continue;
        }
        rings.push(Ring {
            coords,
            area,
            depth: 0,
        });
    }

    // nesting depth decides outer rings (even) vs holes (odd)
    let depths: Vec<usize> = (0..rings.len())
        .map(|i| {
            (0..rings.len())
                .filter(|&j| j != i && contains(&rings[j].coords, &rings[i].coords[0]))
                .count()
        })
        .collect();
    for (ring, depth) in rings.iter_mut().zip(depths) {
        ring.depth = depth;
    }

    let mut triangles: Vec<[Point3<Real>; 3]> = Vec::new();
    for (i, outer) in rings.iter().enumerate() {
        if outer.depth % 2 != 0 {
            continue;
        }

        // holes one level deeper, whose immediate parent is this ring
        let holes: Vec<LineString<Real>> = rings
            .iter()
            .enumerate()
            .filter(|&(j, hole)| {
                j != i
                    && hole.depth == outer.depth + 1
                    && contains(&outer.coords, &hole.coords[0])
            })
            .map(|(_, hole)| LineString::new(oriented(&hole.coords, hole.area, false)))
            .collect();

        let polygon = GeoPolygon::new(
            LineString::new(oriented(&outer.coords, outer.area, true)),
            holes,
        );

        // Ear-cut triangulation on the polygon (outer + holes)
        let triangulation = polygon.earcut_triangles_raw();
        let vertices = triangulation.vertices;
        for tri in triangulation.triangle_indices.chunks_exact(3) {
            let mut corners = [
                Coord {
                    x: vertices[2 * tri[0]],
                    y: vertices[2 * tri[0] + 1],
                },
                Coord {
                    x: vertices[2 * tri[1]],
                    y: vertices[2 * tri[1] + 1],
                },
                Coord {
                    x: vertices[2 * tri[2]],
                    y: vertices[2 * tri[2] + 1],
                },
            ];
            // enforce counter-clockwise winding in the frame
            let ab = (corners[1].x - corners[0].x, corners[1].y - corners[0].y);
            let ac = (corners[2].x - corners[0].x, corners[2].y - corners[0].y);
            if ab.0 * ac.1 - ab.1 * ac.0 < 0.0 {
                corners.swap(1, 2);
            }

            triangles.push(corners.map(|c| {
                snap.get(&quantize(&c))
                    .copied()
                    .unwrap_or_else(|| plane.lift(c.x, c.y))
            }));
        }
    }

    triangles
}

/// Signed shoelace area of an unclosed ring.
fn shoelace_area(coords: &[Coord<Real>]) -> Real {
    let n = coords.len();
    let mut twice = 0.0;
    for i in 0..n {
        let a = coords[i];
        let b = coords[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}

/// Ring coordinates oriented counter-clockwise (`ccw = true`) or clockwise.
fn oriented(coords: &[Coord<Real>], area: Real, ccw: bool) -> Vec<Coord<Real>> {
    if (area > 0.0) == ccw {
        coords.to_vec()
    } else {
        coords.iter().rev().copied().collect()
    }
}

/// Point-in-polygon by ray crossing, boundary treatment irrelevant here
/// (rings of a valid cut never touch).
fn contains(ring: &[Coord<Real>], point: &Coord<Real>) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}
