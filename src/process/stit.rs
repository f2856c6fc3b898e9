use rand::Rng;

use super::recursive::{self, SplitRule};
use super::{HyperplaneProcess, TessellationResult};
use crate::direction::DirectionDistribution;
use crate::geometry::{ConvexRegion, Hyperplane};

/// Cells at or below this measure never split.
const NEGLIGIBLE_MEASURE: f64 = 1e-9;

/// Stable-under-iteration tessellation.
///
/// A cell of measure `m` waits `Exp(m)` before splitting, so large cells
/// split sooner. The cut passes through a point drawn uniformly from the
/// cell's bounding box with a normal drawn from the direction distribution;
/// a cut that misses the cell leaves it terminal.
#[derive(Debug, Clone, Copy)]
pub struct StitProcess<'a, const D: usize> {
    directions: &'a DirectionDistribution<D>,
}

impl<'a, const D: usize> StitProcess<'a, D> {
    pub fn new(directions: &'a DirectionDistribution<D>) -> Self {
        Self { directions }
    }
}

impl<const D: usize, C: ConvexRegion<D>> SplitRule<D, C> for StitProcess<'_, D> {
    fn rate(&self, cell: &C) -> f64 {
        cell.measure()
    }

    fn negligible_rate(&self) -> f64 {
        NEGLIGIBLE_MEASURE
    }

    fn propose<R: Rng + ?Sized>(&self, cell: &C, rng: &mut R) -> Option<Hyperplane<D>> {
        let anchor = cell.bounding_box().sample_point(rng);
        let normal = self.directions.sample(rng);
        Hyperplane::new(anchor, normal).ok()
    }
}

impl<const D: usize, C: ConvexRegion<D>> HyperplaneProcess<D, C> for StitProcess<'_, D> {
    fn generate<R: Rng + ?Sized>(&self, domain: &C, stop_time: f64, rng: &mut R) -> TessellationResult<D, C> {
        recursive::run(self, domain, stop_time, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, ConvexPolygon, ConvexPolyhedron};
    use crate::process::TerminalReason;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square() -> ConvexPolygon {
        ConvexPolygon::from_bounding_box(&BoundingBox::unit())
    }

    #[test]
    fn zero_stop_time_keeps_domain() {
        let directions = DirectionDistribution::<2>::isotropic();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = StitProcess::new(&directions).generate(&square(), 0.0, &mut rng);
        assert_eq!(result.cell_count(), 1);
        assert_eq!(result.hyperplane_count(), 0);
        assert_eq!(result.cells()[0], square());
        let lineage = result.lineage().unwrap();
        assert_eq!(lineage.terminal_count(TerminalReason::Expired), 1);
    }

    #[test]
    fn planar_run_tiles_square() {
        let directions = DirectionDistribution::<2>::isotropic();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let result = StitProcess::new(&directions).generate(&square(), 8.0, &mut rng);
        assert!(result.cell_count() > 1);
        assert!((result.total_measure() - 1.0).abs() < 1e-9);
        assert!(result.hyperplane_count() >= result.cell_count() - 1);
    }

    #[test]
    fn spatial_run_tiles_cube() {
        let directions = DirectionDistribution::<3>::isotropic();
        let cube = ConvexPolyhedron::from_bounding_box(&BoundingBox::unit());
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let result = StitProcess::new(&directions).generate(&cube, 6.0, &mut rng);
        assert!(result.cell_count() > 1);
        assert!((result.total_measure() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_domain_is_negligible() {
        let directions = DirectionDistribution::<2>::isotropic();
        let speck = BoundingBox::new([0.0, 0.0], [1e-5, 1e-5]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let result = StitProcess::new(&directions).generate(
            &ConvexPolygon::from_bounding_box(&speck),
            100.0,
            &mut rng,
        );
        assert_eq!(result.cell_count(), 1);
        let lineage = result.lineage().unwrap();
        assert_eq!(lineage.terminal_count(TerminalReason::Negligible), 1);
    }

    #[test]
    fn configured_directions_are_used() {
        let directions = DirectionDistribution::<2>::from_matrix(&[[0.0, 1.0]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let result = StitProcess::new(&directions).generate(&square(), 10.0, &mut rng);
        assert!(result.hyperplane_count() > 0);
        assert!(result.hyperplanes().iter().all(|h| h.normal() == [0.0, 1.0]));
    }
}
