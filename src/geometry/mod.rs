//! Convex-region kernel: the geometry the hyperplane processes cut.
//!
//! The processes only ever talk to cells through [`ConvexRegion`], so the
//! planar ([`ConvexPolygon`]) and spatial ([`ConvexPolyhedron`]) backends are
//! interchangeable and can be tested on their own with synthetic shapes.
//!
//! # Split contract
//!
//! [`ConvexRegion::split_by_hyperplane`] returns between zero and two parts,
//! below-side first. Parts whose measure is negligible relative to the parent
//! are not usable and are never returned, so a tangent cut yields one part.
//! Callers that need an all-or-nothing answer use
//! [`ConvexRegion::try_split`], which folds "fewer than two parts" and kernel
//! errors into `None`: the cell stays whole.

mod bounding_box;
mod clip;
mod hyperplane;
mod polygon;
mod polyhedron;
pub mod vector;

use std::fmt::Debug;

use tracing::trace;

pub use bounding_box::BoundingBox;
pub use hyperplane::Hyperplane;
pub use polygon::ConvexPolygon;
pub use polyhedron::ConvexPolyhedron;
pub use vector::Point;

use crate::error::GeometryError;

/// Parts smaller than this fraction of their parent are discarded.
pub(crate) const MIN_PART_FRACTION: f64 = 1e-12;

/// A bounded convex region of `D`-dimensional space.
pub trait ConvexRegion<const D: usize>: Clone + Debug {
    /// The region covering exactly `bounds`.
    fn from_bounding_box(bounds: &BoundingBox<D>) -> Self;

    /// Area (D = 2) or volume (D = 3); never negative.
    fn measure(&self) -> f64;

    /// Tight axis-aligned extent of the region.
    fn bounding_box(&self) -> BoundingBox<D>;

    /// A point in the interior of any non-degenerate region.
    fn interior_point(&self) -> Point<D>;

    /// Returns true if `point` lies inside the region or within `tolerance`
    /// of its boundary.
    fn contains(&self, point: &Point<D>, tolerance: f64) -> bool;

    /// Splits the region into its usable parts below and above `plane`.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteInput` if the region or the plane carries a
    /// non-finite coordinate.
    fn split_by_hyperplane(&self, plane: &Hyperplane<D>) -> Result<Vec<Self>, GeometryError>;

    /// Splits into exactly two parts, or returns `None` and keeps the region
    /// whole when the cut is tangent, misses, or fails in the kernel.
    fn try_split(&self, plane: &Hyperplane<D>) -> Option<(Self, Self)> {
        match self.split_by_hyperplane(plane) {
            Ok(parts) => match <[Self; 2]>::try_from(parts) {
                Ok([below, above]) => Some((below, above)),
                Err(parts) => {
                    trace!(parts = parts.len(), "degenerate split, keeping cell whole");
                    None
                }
            },
            Err(err) => {
                trace!(%err, "geometry kernel rejected split, keeping cell whole");
                None
            }
        }
    }
}

/// Keeps the candidate parts whose measure is usable relative to `parent`.
pub(crate) fn usable_parts<const D: usize, C: ConvexRegion<D>>(
    parent: f64,
    candidates: impl IntoIterator<Item = C>,
) -> Vec<C> {
    let threshold = parent * MIN_PART_FRACTION;
    candidates
        .into_iter()
        .filter(|part| {
            let m = part.measure();
            m.is_finite() && m > threshold && m > 0.0
        })
        .collect()
}
