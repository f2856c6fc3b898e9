//! Direction distributions for hyperplane normals.
//!
//! A [`DirectionDistribution`] is either isotropic (uniform on the unit
//! sphere) or a discrete distribution over a finite set of unit vectors.
//! The discrete form is configured from a matrix whose rows are directions
//! and whose row norms are the unnormalized weights.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::TessellationError;
use crate::geometry::vector::{self, Point};
use crate::notice::Notice;

/// Probabilities further than this from summing to one trigger a notice.
const RENORMALIZATION_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
struct WeightedDirections<const D: usize> {
    directions: Vec<Point<D>>,
    probabilities: Vec<f64>,
    index: WeightedIndex<f64>,
}

/// Samples unit vectors in `D` dimensions.
#[derive(Debug, Clone, Default)]
pub struct DirectionDistribution<const D: usize> {
    weighted: Option<WeightedDirections<D>>,
    notices: Vec<Notice>,
}

impl<const D: usize> DirectionDistribution<D> {
    /// The isotropic distribution.
    pub fn isotropic() -> Self {
        Self::default()
    }

    /// Configures a discrete distribution from a direction matrix.
    ///
    /// Each row is a direction with exactly `D` entries; its Euclidean norm
    /// is its weight. Zero-norm rows are dropped. Weights are normalized into
    /// probabilities, and a [`Notice`] is raised when that changed them.
    ///
    /// # Errors
    ///
    /// - `DirectionColumnMismatch` if a row does not have `D` entries
    /// - `NonFiniteDirection` if a row holds NaN or an infinity
    /// - `NoPositiveDirections` if every row has zero norm (or there are none)
    pub fn from_matrix<Row: AsRef<[f64]>>(rows: &[Row]) -> Result<Self, TessellationError> {
        let mut directions = Vec::with_capacity(rows.len());
        let mut weights = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;

        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let row: Point<D> =
                row.try_into()
                    .map_err(|_| TessellationError::DirectionColumnMismatch {
                        row: row_index,
                        expected: D,
                        found: row.len(),
                    })?;
            if !vector::is_finite(&row) {
                return Err(TessellationError::NonFiniteDirection { row: row_index });
            }
            let weight = vector::norm(&row);
            match vector::normalize(&row) {
                Some(unit) if weight > 0.0 => {
                    directions.push(unit);
                    weights.push(weight);
                }
                _ => dropped += 1,
            }
        }

        if directions.is_empty() {
            return Err(TessellationError::NoPositiveDirections);
        }

        let mut notices = Vec::new();
        if dropped > 0 {
            notices.push(Notice::ZeroWeightRowsDropped { count: dropped }.emit());
        }

        let total_weight: f64 = weights.iter().sum();
        if (total_weight - 1.0).abs() > RENORMALIZATION_TOLERANCE {
            notices.push(Notice::DirectionsRenormalized { total_weight }.emit());
        }
        let probabilities: Vec<f64> = weights.iter().map(|w| w / total_weight).collect();
        let index = WeightedIndex::new(&probabilities)
            .map_err(|_| TessellationError::NoPositiveDirections)?;

        Ok(Self {
            weighted: Some(WeightedDirections {
                directions,
                probabilities,
                index,
            }),
            notices,
        })
    }

    /// Returns true if no direction matrix is configured.
    pub fn is_isotropic(&self) -> bool {
        self.weighted.is_none()
    }

    /// Configured unit directions; empty when isotropic.
    pub fn directions(&self) -> &[Point<D>] {
        self.weighted
            .as_ref()
            .map(|w| w.directions.as_slice())
            .unwrap_or(&[])
    }

    /// Probabilities of the configured directions; empty when isotropic.
    pub fn probabilities(&self) -> &[f64] {
        self.weighted
            .as_ref()
            .map(|w| w.probabilities.as_slice())
            .unwrap_or(&[])
    }

    /// Notices raised while configuring this distribution.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Draws one unit vector.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<D> {
        match &self.weighted {
            Some(w) => w.directions[w.index.sample(rng)],
            None => sample_isotropic(rng),
        }
    }
}

/// Normalized vector of `D` independent standard normals.
fn sample_isotropic<const D: usize, R: Rng + ?Sized>(rng: &mut R) -> Point<D> {
    loop {
        let raw: Point<D> = std::array::from_fn(|_| StandardNormal.sample(&mut *rng));
        if let Some(unit) = vector::normalize(&raw) {
            return unit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn isotropic_samples_are_unit() {
        let dist = DirectionDistribution::<3>::isotropic();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let v = dist.sample(&mut rng);
            assert!((vector::norm(&v) - 1.0).abs() < 1e-12);
        }
        assert!(dist.is_isotropic());
        assert!(dist.directions().is_empty());
    }

    #[test]
    fn isotropic_is_centred() {
        let dist = DirectionDistribution::<2>::isotropic();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let n = 20_000;
        let mut sum = [0.0; 2];
        for _ in 0..n {
            sum = vector::add(&sum, &dist.sample(&mut rng));
        }
        assert!((sum[0] / n as f64).abs() < 0.03);
        assert!((sum[1] / n as f64).abs() < 0.03);
    }

    #[test]
    fn row_norms_become_probabilities() {
        let dist = DirectionDistribution::<2>::from_matrix(&[[3.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(dist.probabilities().len(), 2);
        assert!((dist.probabilities()[0] - 0.75).abs() < 1e-12);
        assert!((dist.probabilities()[1] - 0.25).abs() < 1e-12);
        assert_eq!(dist.directions()[0], [1.0, 0.0]);
        assert!(dist
            .notices()
            .contains(&Notice::DirectionsRenormalized { total_weight: 4.0 }));
    }

    #[test]
    fn empirical_frequencies_match() {
        let dist = DirectionDistribution::<2>::from_matrix(&[[3.0, 0.0], [0.0, 1.0]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let draws = 10_000;
        let horizontal = (0..draws)
            .filter(|_| dist.sample(&mut rng) == [1.0, 0.0])
            .count();
        let freq = horizontal as f64 / draws as f64;
        assert!((freq - 0.75).abs() < 0.02, "frequency {freq}");
    }

    #[test]
    fn zero_rows_are_dropped() {
        let rows = vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 2.0]];
        let dist = DirectionDistribution::<3>::from_matrix(&rows).unwrap();
        assert_eq!(dist.directions(), &[[0.0, 0.0, 1.0]]);
        assert_eq!(dist.probabilities(), &[1.0]);
        assert!(dist
            .notices()
            .contains(&Notice::ZeroWeightRowsDropped { count: 1 }));
    }

    #[test]
    fn unit_weights_need_no_renormalization() {
        let dist = DirectionDistribution::<2>::from_matrix(&[[0.0, 1.0]]).unwrap();
        assert!(dist.notices().is_empty());
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(dist.sample(&mut rng), [0.0, 1.0]);
    }

    #[test]
    fn all_zero_rows_fail() {
        let result = DirectionDistribution::<2>::from_matrix(&[[0.0, 0.0]]);
        assert_eq!(result.unwrap_err(), TessellationError::NoPositiveDirections);
    }

    #[test]
    fn empty_matrix_fails() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let result = DirectionDistribution::<3>::from_matrix(&rows);
        assert_eq!(result.unwrap_err(), TessellationError::NoPositiveDirections);
    }

    #[test]
    fn column_mismatch_fails() {
        let rows = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let result = DirectionDistribution::<2>::from_matrix(&rows);
        assert_eq!(
            result.unwrap_err(),
            TessellationError::DirectionColumnMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn non_finite_row_fails() {
        let result = DirectionDistribution::<2>::from_matrix(&[[1.0, f64::NAN]]);
        assert_eq!(
            result.unwrap_err(),
            TessellationError::NonFiniteDirection { row: 0 }
        );
    }
}
