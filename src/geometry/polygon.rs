//! Planar convex polygons.

use super::clip::{clip_loop, tolerance_for};
use super::vector::{self, Point};
use super::{usable_parts, BoundingBox, ConvexRegion, Hyperplane};
use crate::error::GeometryError;

/// A convex polygon stored as a counter-clockwise vertex loop.
///
/// The loop is implicitly closed (the last vertex connects to the first).
/// Clipping preserves orientation, so every cell derived from a domain box
/// stays counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Point<2>>,
}

impl ConvexPolygon {
    /// Wraps a vertex loop. The caller is responsible for convexity; any
    /// winding is accepted and degenerate (zero-area) loops are allowed.
    pub fn new(vertices: Vec<Point<2>>) -> Self {
        Self { vertices }
    }

    /// Boundary loop, counter-clockwise for cells produced by this crate.
    pub fn vertices(&self) -> &[Point<2>] {
        &self.vertices
    }

    /// Shoelace area: positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a[0] * b[1] - b[0] * a[1]
            })
            .sum();
        0.5 * twice
    }

    /// Boundary edges as `(start, end)` pairs, for line drawing.
    pub fn edges(&self) -> impl Iterator<Item = (Point<2>, Point<2>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl ConvexRegion<2> for ConvexPolygon {
    fn from_bounding_box(bounds: &BoundingBox<2>) -> Self {
        let [x0, y0] = bounds.min();
        let [x1, y1] = bounds.max();
        Self::new(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]])
    }

    fn measure(&self) -> f64 {
        self.signed_area().abs()
    }

    fn bounding_box(&self) -> BoundingBox<2> {
        BoundingBox::from_points(self.vertices.iter()).unwrap_or(BoundingBox::at([0.0; 2]))
    }

    fn interior_point(&self) -> Point<2> {
        vector::mean(self.vertices.iter()).unwrap_or([0.0, 0.0])
    }

    fn contains(&self, point: &Point<2>, tolerance: f64) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let orientation = self.signed_area().signum();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let edge = vector::sub(&b, &a);
            let length = vector::norm(&edge);
            if length == 0.0 {
                return true;
            }
            let rel = vector::sub(point, &a);
            // Signed distance of `point` to the edge line, positive inside.
            orientation * (edge[0] * rel[1] - edge[1] * rel[0]) / length >= -tolerance
        })
    }

    fn split_by_hyperplane(&self, plane: &Hyperplane<2>) -> Result<Vec<Self>, GeometryError> {
        if !self.vertices.iter().all(vector::is_finite)
            || !vector::is_finite(&plane.anchor())
            || !vector::is_finite(&plane.normal())
        {
            return Err(GeometryError::NonFiniteInput);
        }
        let tolerance = tolerance_for(self.bounding_box().diagonal());
        let clipped = clip_loop(&self.vertices, plane, tolerance);

        let candidates = [clipped.below, clipped.above]
            .into_iter()
            .filter(|side| side.len() >= 3)
            .map(ConvexPolygon::new);
        Ok(usable_parts(self.measure(), candidates))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ConvexPolygon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ConvexPolygon", 1)?;
        s.serialize_field("vertices", &self.vertices)?;
        s.end()
    }
}
