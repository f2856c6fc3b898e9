//! Axis-aligned bounding boxes.

use std::fmt::Display;

use rand::Rng;

use super::vector::Point;
use crate::error::TessellationError;

/// Axis-aligned box `[min_0, max_0] × … × [min_{D-1}, max_{D-1}]`.
///
/// Used both as the tessellation domain and as the per-cell extent that
/// drives uniform anchor sampling and Mondrian rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<const D: usize> {
    min: Point<D>,
    max: Point<D>,
}

impl<const D: usize> BoundingBox<D> {
    /// Creates a box from its lower and upper corners.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomain` if a coordinate is non-finite or if
    /// `min[i] >= max[i]` on some axis.
    pub fn new(min: Point<D>, max: Point<D>) -> Result<Self, TessellationError> {
        for axis in 0..D {
            if !min[axis].is_finite() || !max[axis].is_finite() {
                return Err(TessellationError::InvalidDomain(format!(
                    "axis {axis} has a non-finite bound"
                )));
            }
            if min[axis] >= max[axis] {
                return Err(TessellationError::InvalidDomain(format!(
                    "axis {axis}: lower bound {} is not below upper bound {}",
                    min[axis], max[axis]
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// The unit square / cube `[0, 1]^D`.
    pub fn unit() -> Self {
        Self {
            min: [0.0; D],
            max: [1.0; D],
        }
    }

    /// Zero-extent box at a single point.
    pub const fn at(point: Point<D>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Tight box around a set of points. Degenerate (flat) boxes are allowed.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point<D>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..D {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        });
        Some(Self { min, max })
    }

    pub const fn min(&self) -> Point<D> {
        self.min
    }

    pub const fn max(&self) -> Point<D> {
        self.max
    }

    /// Side length along each axis (never negative).
    pub fn extents(&self) -> Point<D> {
        std::array::from_fn(|i| (self.max[i] - self.min[i]).max(0.0))
    }

    /// Sum of side lengths; the Mondrian splitting rate.
    pub fn side_sum(&self) -> f64 {
        self.extents().iter().sum()
    }

    /// Area (D = 2) or volume (D = 3) of the box.
    pub fn measure(&self) -> f64 {
        self.extents().iter().product()
    }

    pub fn center(&self) -> Point<D> {
        std::array::from_fn(|i| 0.5 * (self.min[i] + self.max[i]))
    }

    /// Length of the main diagonal.
    pub fn diagonal(&self) -> f64 {
        self.extents().iter().map(|e| e * e).sum::<f64>().sqrt()
    }

    /// Returns true if `point` lies in the closed box.
    pub fn contains(&self, point: &Point<D>) -> bool {
        (0..D).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Draws a point uniformly in the box, independently per coordinate.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<D> {
        std::array::from_fn(|i| self.min[i] + rng.gen::<f64>() * (self.max[i] - self.min[i]))
    }
}

impl<const D: usize> Display for BoundingBox<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for axis in 0..D {
            if axis > 0 {
                write!(f, " × ")?;
            }
            write!(f, "[{:.3}, {:.3}]", self.min[axis], self.max[axis])?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<const D: usize> serde::Serialize for BoundingBox<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("BoundingBox", 2)?;
        s.serialize_field("min", &self.min[..])?;
        s.serialize_field("max", &self.max[..])?;
        s.end()
    }
}
