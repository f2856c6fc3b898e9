//! Two-sided clipping of a convex vertex loop against a hyperplane.
//!
//! This is Sutherland-Hodgman run for both half-spaces at once: every edge
//! that crosses the hyperplane contributes its intersection point to both
//! output loops, and vertices lying on the hyperplane (within tolerance)
//! belong to both.

use super::hyperplane::Hyperplane;
use super::vector::{self, Point};

/// Relative tolerance for classifying a vertex as lying on a hyperplane.
pub(crate) const PLANE_TOLERANCE: f64 = 1e-12;

/// Result of clipping one vertex loop.
#[derive(Debug, Default)]
pub(crate) struct ClippedLoop<const D: usize> {
    /// Portion with non-positive signed distance, in input order.
    pub below: Vec<Point<D>>,
    /// Portion with non-negative signed distance, in input order.
    pub above: Vec<Point<D>>,
    /// Vertices on the hyperplane plus edge crossings.
    pub on_plane: Vec<Point<D>>,
}

/// Absolute tolerance for a region whose bounding box has diagonal `diagonal`.
pub(crate) fn tolerance_for(diagonal: f64) -> f64 {
    PLANE_TOLERANCE * diagonal.max(1.0)
}

/// Clips a closed loop of vertices against `plane`.
pub(crate) fn clip_loop<const D: usize>(
    vertices: &[Point<D>],
    plane: &Hyperplane<D>,
    tolerance: f64,
) -> ClippedLoop<D> {
    let mut out = ClippedLoop {
        below: Vec::with_capacity(vertices.len() + 1),
        above: Vec::with_capacity(vertices.len() + 1),
        on_plane: Vec::new(),
    };
    if vertices.is_empty() {
        return out;
    }

    let distances: Vec<f64> = vertices.iter().map(|v| plane.signed_distance(v)).collect();

    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        let (current, next) = (&vertices[i], &vertices[j]);
        let (d1, d2) = (distances[i], distances[j]);

        if d1 > tolerance {
            out.above.push(*current);
        } else if d1 < -tolerance {
            out.below.push(*current);
        } else {
            out.above.push(*current);
            out.below.push(*current);
            out.on_plane.push(*current);
        }

        let crosses = (d1 > tolerance && d2 < -tolerance) || (d1 < -tolerance && d2 > tolerance);
        if crosses {
            let x = crossing(current, d1, next, d2);
            out.above.push(x);
            out.below.push(x);
            out.on_plane.push(x);
        }
    }

    out
}

/// Intersection of segment `p → q` with the hyperplane.
///
/// Always interpolated from the lexicographically smaller endpoint so that
/// two faces sharing an edge produce bit-identical crossing points.
fn crossing<const D: usize>(p: &Point<D>, dp: f64, q: &Point<D>, dq: f64) -> Point<D> {
    let (a, da, b, db) = if vector::lex_less(p, q) {
        (p, dp, q, dq)
    } else {
        (q, dq, p, dp)
    };
    let t = da / (da - db);
    vector::lerp(a, b, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point<2>> {
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
    }

    #[test]
    fn vertical_cut_splits_square() {
        let plane = Hyperplane::axis_aligned([0.25, 0.0], 0);
        let clipped = clip_loop(&square(), &plane, 1e-12);
        assert_eq!(clipped.below.len(), 4);
        assert_eq!(clipped.above.len(), 4);
        assert_eq!(clipped.on_plane.len(), 2);
        assert!(clipped.below.iter().all(|p| p[0] <= 0.25 + 1e-12));
        assert!(clipped.above.iter().all(|p| p[0] >= 0.25 - 1e-12));
    }

    #[test]
    fn missing_plane_keeps_everything_on_one_side() {
        let plane = Hyperplane::axis_aligned([2.0, 0.0], 0);
        let clipped = clip_loop(&square(), &plane, 1e-12);
        assert_eq!(clipped.below.len(), 4);
        assert!(clipped.above.is_empty());
        assert!(clipped.on_plane.is_empty());
    }

    #[test]
    fn diagonal_through_vertices() {
        let plane = Hyperplane::new([0.0, 0.0], [1.0, -1.0]).unwrap();
        let clipped = clip_loop(&square(), &plane, 1e-12);
        assert_eq!(clipped.below.len(), 3);
        assert_eq!(clipped.above.len(), 3);
        assert_eq!(clipped.on_plane.len(), 2);
    }

    #[test]
    fn crossing_is_symmetric() {
        let p = [0.0, 0.3];
        let q = [1.0, 0.7];
        let a = crossing(&p, -0.4, &q, 0.6);
        let b = crossing(&q, 0.6, &p, -0.4);
        assert_eq!(a, b);
    }
}
