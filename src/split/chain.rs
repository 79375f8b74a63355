//! Chaining oriented cut segments head-to-tail into closed loops.

use crate::errors::SplitError;
use crate::float_types::Real;
use crate::split::CutSegment;
use hashbrown::HashMap;
use nalgebra::Point3;

type Key = (i64, i64, i64);

fn quantize(p: &Point3<Real>, eps: Real) -> Key {
    (
        (p.x / eps).round() as i64,
        (p.y / eps).round() as i64,
        (p.z / eps).round() as i64,
    )
}

/// Chain segments into closed polygons by matching endpoints within `eps`.
/// Segments are oriented consistently (each is traversed by the positive-side
/// boundary), so every endpoint of a clean cut starts exactly one segment.
///
/// ## Errors
/// [`SplitError::OpenLoop`] with the unclosed polylines if any chain runs out
/// of continuations before returning to its start.
pub(crate) fn chain_segments(
    segments: &[CutSegment],
    eps: Real,
) -> Result<Vec<Vec<Point3<Real>>>, SplitError> {
    // endpoint -> indices of segments starting there
    let mut starts: HashMap<Key, Vec<usize>> = HashMap::new();
    for (i, seg) in segments.iter().enumerate() {
        // zero-length segments only confuse the walk
        if quantize(&seg.from, eps) == quantize(&seg.to, eps) {
            continue;
        }
        starts.entry(quantize(&seg.from, eps)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut loops: Vec<Vec<Point3<Real>>> = Vec::new();
    let mut open_chains: Vec<Vec<Point3<Real>>> = Vec::new();

    for first in 0..segments.len() {
        if used[first] || quantize(&segments[first].from, eps) == quantize(&segments[first].to, eps)
        {
            continue;
        }
        used[first] = true;

        let start_key = quantize(&segments[first].from, eps);
        let mut chain = vec![segments[first].from, segments[first].to];

        loop {
            let tail_key = quantize(&chain[chain.len() - 1], eps);
            if tail_key == start_key {
                // closed: the last point duplicates the first
                chain.pop();
                loops.push(chain);
                break;
            }

            let next = starts
                .get(&tail_key)
                .and_then(|candidates| candidates.iter().find(|&&i| !used[i]).copied());
            match next {
                Some(i) => {
                    used[i] = true;
                    chain.push(segments[i].to);
                }
                None => {
                    open_chains.push(chain);
                    break;
                }
            }
        }
    }

    if !open_chains.is_empty() {
        return Err(SplitError::OpenLoop {
            chains: open_chains,
        });
    }

    // a closed polygon needs at least a triangle
    loops.retain(|poly| poly.len() >= 3);
    Ok(loops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(from: [Real; 3], to: [Real; 3]) -> CutSegment {
        CutSegment {
            from: Point3::new(from[0], from[1], from[2]),
            to: Point3::new(to[0], to[1], to[2]),
        }
    }

    #[test]
    fn chains_a_square_loop() {
        let segments = [
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
            seg([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
            seg([0.0, 1.0, 0.0], [0.0, 0.0, 0.0]),
        ];
        let loops = chain_segments(&segments, 1e-9).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn reports_open_chain() {
        let segments = [
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
        ];
        let err = chain_segments(&segments, 1e-9).unwrap_err();
        match err {
            SplitError::OpenLoop { chains } => {
                assert_eq!(chains.len(), 1);
                assert_eq!(chains[0].len(), 3);
            }
            other => panic!("expected OpenLoop, got {other:?}"),
        }
    }

    #[test]
    fn two_disjoint_loops() {
        let segments = [
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            seg([0.0, 1.0, 0.0], [0.0, 0.0, 0.0]),
            seg([5.0, 0.0, 0.0], [6.0, 0.0, 0.0]),
            seg([6.0, 0.0, 0.0], [5.0, 1.0, 0.0]),
            seg([5.0, 1.0, 0.0], [5.0, 0.0, 0.0]),
        ];
        let loops = chain_segments(&segments, 1e-9).unwrap();
        assert_eq!(loops.len(), 2);
    }
}
