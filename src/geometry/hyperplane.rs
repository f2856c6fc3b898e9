//! Oriented hyperplanes (lines in 2D, planes in 3D).

use super::vector::{self, Point};
use crate::error::GeometryError;

/// A hyperplane through `anchor` with unit `normal`.
///
/// The normal orients the hyperplane: points with negative signed distance
/// are *below* it, points with positive signed distance are *above* it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperplane<const D: usize> {
    anchor: Point<D>,
    normal: Point<D>,
}

impl<const D: usize> Hyperplane<D> {
    /// Creates a hyperplane, normalizing `normal` to unit length.
    ///
    /// # Errors
    ///
    /// - `NonFiniteInput` if the anchor has a non-finite coordinate
    /// - `DegenerateNormal` if `normal` has zero or non-finite length
    pub fn new(anchor: Point<D>, normal: Point<D>) -> Result<Self, GeometryError> {
        if !vector::is_finite(&anchor) {
            return Err(GeometryError::NonFiniteInput);
        }
        let normal = vector::normalize(&normal).ok_or(GeometryError::DegenerateNormal)?;
        Ok(Self { anchor, normal })
    }

    /// Axis-aligned hyperplane `x_axis = anchor[axis]` with normal `e_axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= D`.
    pub fn axis_aligned(anchor: Point<D>, axis: usize) -> Self {
        assert!(axis < D, "axis {} out of range for dimension {}", axis, D);
        Self {
            anchor,
            normal: vector::basis(axis),
        }
    }

    pub const fn anchor(&self) -> Point<D> {
        self.anchor
    }

    pub const fn normal(&self) -> Point<D> {
        self.normal
    }

    /// Signed distance from `point` to the hyperplane along the normal.
    #[inline]
    pub fn signed_distance(&self, point: &Point<D>) -> f64 {
        vector::dot(&vector::sub(point, &self.anchor), &self.normal)
    }

    /// Index of the basis vector this hyperplane is normal to, if any.
    pub fn axis(&self) -> Option<usize> {
        let axis = self.normal.iter().position(|c| *c != 0.0)?;
        let rest_zero = self
            .normal
            .iter()
            .enumerate()
            .all(|(i, c)| i == axis || *c == 0.0);
        (rest_zero && self.normal[axis] == 1.0).then_some(axis)
    }
}

#[cfg(feature = "serde")]
impl<const D: usize> serde::Serialize for Hyperplane<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Hyperplane", 2)?;
        s.serialize_field("anchor", &self.anchor[..])?;
        s.serialize_field("normal", &self.normal[..])?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes() {
        let plane = Hyperplane::new([0.0, 0.0], [0.0, 5.0]).unwrap();
        assert_eq!(plane.normal(), [0.0, 1.0]);
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert_eq!(
            Hyperplane::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            Err(GeometryError::DegenerateNormal)
        );
    }

    #[test]
    fn nan_anchor_is_rejected() {
        assert_eq!(
            Hyperplane::new([f64::NAN, 0.0], [1.0, 0.0]),
            Err(GeometryError::NonFiniteInput)
        );
    }

    #[test]
    fn signed_distance_sign() {
        let plane = Hyperplane::new([0.5, 0.5], [1.0, 0.0]).unwrap();
        assert!(plane.signed_distance(&[0.0, 0.9]) < 0.0);
        assert!(plane.signed_distance(&[0.75, 0.1]) > 0.0);
        assert!((plane.signed_distance(&[0.75, 0.1]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn axis_detection() {
        assert_eq!(Hyperplane::<3>::axis_aligned([0.0; 3], 2).axis(), Some(2));
        let oblique = Hyperplane::new([0.0, 0.0], [1.0, 1.0]).unwrap();
        assert_eq!(oblique.axis(), None);
    }
}
