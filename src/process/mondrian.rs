use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::Distribution;

use super::recursive::{self, SplitRule};
use super::{HyperplaneProcess, TessellationResult};
use crate::geometry::{ConvexRegion, Hyperplane};

/// Cells whose side lengths sum to at most this never split.
const NEGLIGIBLE_SIDE_SUM: f64 = 1e-12;

/// Axis-aligned analogue of STIT.
///
/// The clock rate is the sum of the bounding-box side lengths. A split picks
/// an axis with probability proportional to its side length and cuts
/// uniformly along it, so every normal is a standard basis vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct MondrianProcess;

impl MondrianProcess {
    pub fn new() -> Self {
        Self
    }
}

impl<const D: usize, C: ConvexRegion<D>> SplitRule<D, C> for MondrianProcess {
    fn rate(&self, cell: &C) -> f64 {
        cell.bounding_box().side_sum()
    }

    fn negligible_rate(&self) -> f64 {
        NEGLIGIBLE_SIDE_SUM
    }

    fn propose<R: Rng + ?Sized>(&self, cell: &C, rng: &mut R) -> Option<Hyperplane<D>> {
        let bounds = cell.bounding_box();
        let extents = bounds.extents();
        let axis = WeightedIndex::new(extents).ok()?.sample(rng);

        let min = bounds.min();
        let mut anchor = bounds.center();
        anchor[axis] = min[axis] + rng.gen::<f64>() * extents[axis];
        Some(Hyperplane::axis_aligned(anchor, axis))
    }
}

impl<const D: usize, C: ConvexRegion<D>> HyperplaneProcess<D, C> for MondrianProcess {
    fn generate<R: Rng + ?Sized>(&self, domain: &C, stop_time: f64, rng: &mut R) -> TessellationResult<D, C> {
        recursive::run(self, domain, stop_time, rng)
    }
}
