use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::debug;

use super::{HyperplaneProcess, TessellationResult};
use crate::direction::DirectionDistribution;
use crate::geometry::{ConvexRegion, Hyperplane};

/// Poisson hyperplane process.
///
/// Draws `n ~ Poisson(lam * measure(domain))` hyperplanes at once, each
/// anchored uniformly in the domain's bounding box with a normal from the
/// direction distribution, then cuts the domain by all of them. Hyperplanes
/// that miss the domain are still recorded.
#[derive(Debug, Clone, Copy)]
pub struct PoissonProcess<'a, const D: usize> {
    directions: &'a DirectionDistribution<D>,
}

impl<'a, const D: usize> PoissonProcess<'a, D> {
    pub fn new(directions: &'a DirectionDistribution<D>) -> Self {
        Self { directions }
    }

    /// Cuts `domain` by every hyperplane in turn.
    ///
    /// Each current cell is replaced by its two parts, or kept whole if the
    /// hyperplane misses it. The resulting set of cells does not depend on
    /// the order of `hyperplanes`, only the order of the returned list does.
    pub fn clip_all<C: ConvexRegion<D>>(domain: &C, hyperplanes: &[Hyperplane<D>]) -> Vec<C> {
        let mut cells = vec![domain.clone()];
        for plane in hyperplanes {
            cells = cells
                .into_iter()
                .flat_map(|cell| match cell.try_split(plane) {
                    Some((below, above)) => vec![below, above],
                    None => vec![cell],
                })
                .collect();
        }
        cells
    }

    fn draw_count<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> usize {
        if !(mean > 0.0) {
            return 0;
        }
        Poisson::new(mean).map_or(0, |dist| dist.sample(rng) as usize)
    }
}

impl<const D: usize, C: ConvexRegion<D>> HyperplaneProcess<D, C> for PoissonProcess<'_, D> {
    fn generate<R: Rng + ?Sized>(&self, domain: &C, lam: f64, rng: &mut R) -> TessellationResult<D, C> {
        let metric = domain.measure();
        let n = Self::draw_count(lam * metric, rng);
        let bounds = domain.bounding_box();

        let anchors: Vec<_> = (0..n).map(|_| bounds.sample_point(&mut *rng)).collect();
        let hyperplanes: Vec<Hyperplane<D>> = anchors
            .into_iter()
            .filter_map(|anchor| Hyperplane::new(anchor, self.directions.sample(&mut *rng)).ok())
            .collect();

        let cells = Self::clip_all(domain, &hyperplanes);
        debug!(
            cells = cells.len(),
            hyperplanes = hyperplanes.len(),
            lam,
            metric,
            "poisson process finished"
        );
        TessellationResult::new(cells, hyperplanes, None)
    }
}
