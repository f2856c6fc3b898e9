//! Spatial convex polyhedra as face lists.

use std::cmp::Ordering;

use super::clip::{clip_loop, tolerance_for};
use super::vector::{self, Point};
use super::{usable_parts, BoundingBox, ConvexRegion, Hyperplane};
use crate::error::GeometryError;

/// A convex polyhedron stored as its planar faces.
///
/// Each face is a convex vertex loop, counter-clockwise when seen from
/// outside (the right-hand normal points out of the solid). Splitting clips
/// every face and closes each half with a cap polygon lying in the cutting
/// plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolyhedron {
    faces: Vec<Vec<Point<3>>>,
}

impl ConvexPolyhedron {
    /// Wraps a list of faces. The caller is responsible for the faces
    /// bounding a convex solid.
    pub fn new(faces: Vec<Vec<Point<3>>>) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[Vec<Point<3>>] {
        &self.faces
    }

    /// Fan triangulation of every face, for mesh rendering.
    pub fn triangles(&self) -> impl Iterator<Item = [Point<3>; 3]> + '_ {
        self.faces.iter().flat_map(|face| {
            (1..face.len().saturating_sub(1)).map(move |i| [face[0], face[i], face[i + 1]])
        })
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.faces.iter().map(|f| vector::norm(&newell_normal(f)) * 0.5).sum()
    }

    fn all_vertices(&self) -> impl Iterator<Item = &Point<3>> {
        self.faces.iter().flatten()
    }
}

/// Newell's method: a normal whose length is twice the face area.
fn newell_normal(face: &[Point<3>]) -> Point<3> {
    let n = face.len();
    let mut normal = [0.0; 3];
    for i in 0..n {
        let a = face[i];
        let b = face[(i + 1) % n];
        normal[0] += (a[1] - b[1]) * (a[2] + b[2]);
        normal[1] += (a[2] - b[2]) * (a[0] + b[0]);
        normal[2] += (a[0] - b[0]) * (a[1] + b[1]);
    }
    normal
}

/// Orders the points where the cutting plane meets the surface into a loop,
/// counter-clockwise about `normal`. Returns `None` if fewer than three
/// distinct points remain.
fn cap_loop(points: &[Point<3>], normal: &Point<3>, tolerance: f64) -> Option<Vec<Point<3>>> {
    let mut distinct: Vec<Point<3>> = Vec::with_capacity(points.len());
    for p in points {
        let seen = distinct
            .iter()
            .any(|q| vector::norm(&vector::sub(p, q)) <= tolerance);
        if !seen {
            distinct.push(*p);
        }
    }
    if distinct.len() < 3 {
        return None;
    }

    let centre = vector::mean(distinct.iter())?;
    // Seed the in-plane basis with the axis least aligned with the normal.
    let seed_axis = (0..3)
        .min_by(|&i, &j| {
            normal[i]
                .abs()
                .partial_cmp(&normal[j].abs())
                .unwrap_or(Ordering::Equal)
        })
        .unwrap_or(0);
    let u = vector::normalize(&vector::cross(normal, &vector::basis(seed_axis)))?;
    let v = vector::cross(normal, &u);

    let angle = |p: &Point<3>| {
        let rel = vector::sub(p, &centre);
        vector::dot(&rel, &v).atan2(vector::dot(&rel, &u))
    };
    distinct.sort_by(|a, b| angle(a).partial_cmp(&angle(b)).unwrap_or(Ordering::Equal));
    Some(distinct)
}

impl ConvexRegion<3> for ConvexPolyhedron {
    fn from_bounding_box(bounds: &BoundingBox<3>) -> Self {
        let [x0, y0, z0] = bounds.min();
        let [x1, y1, z1] = bounds.max();
        Self::new(vec![
            vec![[x0, y0, z0], [x0, y0, z1], [x0, y1, z1], [x0, y1, z0]],
            vec![[x1, y0, z0], [x1, y1, z0], [x1, y1, z1], [x1, y0, z1]],
            vec![[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]],
            vec![[x0, y1, z0], [x0, y1, z1], [x1, y1, z1], [x1, y1, z0]],
            vec![[x0, y0, z0], [x0, y1, z0], [x1, y1, z0], [x1, y0, z0]],
            vec![[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]],
        ])
    }

    /// Sum of the tetrahedra spanned by an interior point and each face
    /// triangle.
    fn measure(&self) -> f64 {
        let reference = self.interior_point();
        let six_volume: f64 = self
            .triangles()
            .map(|[a, b, c]| {
                let ra = vector::sub(&a, &reference);
                let rb = vector::sub(&b, &reference);
                let rc = vector::sub(&c, &reference);
                vector::dot(&ra, &vector::cross(&rb, &rc)).abs()
            })
            .sum();
        six_volume / 6.0
    }

    fn bounding_box(&self) -> BoundingBox<3> {
        BoundingBox::from_points(self.all_vertices()).unwrap_or(BoundingBox::at([0.0; 3]))
    }

    fn interior_point(&self) -> Point<3> {
        vector::mean(self.all_vertices()).unwrap_or([0.0; 3])
    }

    fn contains(&self, point: &Point<3>, tolerance: f64) -> bool {
        if self.faces.len() < 4 {
            return false;
        }
        let inside = self.interior_point();
        self.faces.iter().all(|face| {
            let Some(normal) = vector::normalize(&newell_normal(face)) else {
                return true;
            };
            let Some(origin) = vector::mean(face.iter()) else {
                return true;
            };
            // Orient the face normal away from the interior.
            let outward = if vector::dot(&vector::sub(&inside, &origin), &normal) > 0.0 {
                vector::scale(&normal, -1.0)
            } else {
                normal
            };
            vector::dot(&vector::sub(point, &origin), &outward) <= tolerance
        })
    }

    fn split_by_hyperplane(&self, plane: &Hyperplane<3>) -> Result<Vec<Self>, GeometryError> {
        if !self.all_vertices().all(vector::is_finite)
            || !vector::is_finite(&plane.anchor())
            || !vector::is_finite(&plane.normal())
        {
            return Err(GeometryError::NonFiniteInput);
        }
        let tolerance = tolerance_for(self.bounding_box().diagonal());

        let mut below = Vec::with_capacity(self.faces.len() + 1);
        let mut above = Vec::with_capacity(self.faces.len() + 1);
        let mut section = Vec::new();
        for face in &self.faces {
            let clipped = clip_loop(face, plane, tolerance);
            // A face lying in the plane makes it a supporting plane.
            if face.len() >= 3 && clipped.on_plane.len() == face.len() {
                return Ok(vec![self.clone()]);
            }
            if clipped.below.len() >= 3 {
                below.push(clipped.below);
            }
            if clipped.above.len() >= 3 {
                above.push(clipped.above);
            }
            section.extend(clipped.on_plane);
        }

        // The cap is counter-clockwise about the normal, i.e. outward for the
        // part below the plane; the part above gets it reversed.
        if let Some(cap) = cap_loop(&section, &plane.normal(), tolerance) {
            let mut reversed = cap.clone();
            reversed.reverse();
            below.push(cap);
            above.push(reversed);
        }

        let candidates = [below, above]
            .into_iter()
            .filter(|faces| faces.len() >= 4)
            .map(ConvexPolyhedron::new);
        Ok(usable_parts(self.measure(), candidates))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ConvexPolyhedron {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ConvexPolyhedron", 1)?;
        s.serialize_field("faces", &self.faces)?;
        s.end()
    }
}
