//! Sampling engine: a process kind bound to a domain and a direction
//! distribution.
//!
//! [`Tessellation`] is generic over the dimension and its cell type. The
//! dimension-erased [`AnyTessellation`] is what [`make_tessellation`] hands
//! out when the dimension is only known at runtime.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::direction::DirectionDistribution;
use crate::error::TessellationError;
use crate::geometry::{BoundingBox, ConvexPolygon, ConvexPolyhedron, ConvexRegion};
use crate::notice::Notice;
use crate::process::{
    HyperplaneProcess, MondrianProcess, PoissonProcess, ProcessKind, StitProcess,
    TessellationResult,
};

/// A configured tessellation engine.
///
/// Holds the most recent sample; sampling again replaces it.
#[derive(Debug, Clone)]
pub struct Tessellation<const D: usize, C> {
    kind: ProcessKind,
    domain: C,
    directions: DirectionDistribution<D>,
    notices: Vec<Notice>,
    result: Option<TessellationResult<D, C>>,
}

pub type PlanarTessellation = Tessellation<2, ConvexPolygon>;
pub type SpatialTessellation = Tessellation<3, ConvexPolyhedron>;

impl<const D: usize, C: ConvexRegion<D>> Tessellation<D, C> {
    /// Engine on the unit square or cube.
    ///
    /// # Errors
    ///
    /// Propagates direction-matrix validation errors. A matrix given to a
    /// process that does not use one is ignored with a notice instead.
    pub fn new(kind: ProcessKind, direction_matrix: Option<&[Vec<f64>]>) -> Result<Self, TessellationError> {
        Self::with_bounds(kind, BoundingBox::unit(), direction_matrix)
    }

    /// Engine on an arbitrary axis-aligned box.
    pub fn with_bounds(
        kind: ProcessKind,
        bounds: BoundingBox<D>,
        direction_matrix: Option<&[Vec<f64>]>,
    ) -> Result<Self, TessellationError> {
        let mut notices = Vec::new();
        let directions = match direction_matrix {
            Some(_) if !kind.uses_directions() => {
                notices.push(Notice::DirectionsIgnored { kind }.emit());
                DirectionDistribution::isotropic()
            }
            Some(matrix) => {
                let directions = DirectionDistribution::from_matrix(matrix)?;
                notices.extend_from_slice(directions.notices());
                directions
            }
            None => DirectionDistribution::isotropic(),
        };

        debug!(%kind, dim = D, domain = %bounds, isotropic = directions.is_isotropic(), "tessellation configured");
        Ok(Self {
            kind,
            domain: C::from_bounding_box(&bounds),
            directions,
            notices,
            result: None,
        })
    }

    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    pub fn domain(&self) -> &C {
        &self.domain
    }

    pub fn directions(&self) -> &DirectionDistribution<D> {
        &self.directions
    }

    /// Notices raised while configuring this engine.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// The most recent sample, if any.
    pub fn result(&self) -> Option<&TessellationResult<D, C>> {
        self.result.as_ref()
    }

    /// Draws a tessellation of the domain.
    ///
    /// `param` is the intensity `lam` for Poisson and the stop time for STIT
    /// and Mondrian.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless `param` is finite and positive.
    /// Nothing else can fail once the engine is built.
    pub fn sample<R: Rng + ?Sized>(
        &mut self,
        param: f64,
        rng: &mut R,
    ) -> Result<&TessellationResult<D, C>, TessellationError> {
        if !(param.is_finite() && param > 0.0) {
            return Err(TessellationError::InvalidParameter(param));
        }

        let result = match self.kind {
            ProcessKind::Poisson => PoissonProcess::new(&self.directions).generate(&self.domain, param, rng),
            ProcessKind::Stit => StitProcess::new(&self.directions).generate(&self.domain, param, rng),
            ProcessKind::Mondrian => MondrianProcess::new().generate(&self.domain, param, rng),
        };
        debug!(
            kind = %self.kind,
            param,
            cells = result.cell_count(),
            hyperplanes = result.hyperplane_count(),
            "sampled tessellation"
        );
        Ok(self.result.insert(result))
    }

    /// [`sample`](Self::sample) with a `ChaCha8Rng` seeded from `seed`.
    pub fn sample_seeded(&mut self, param: f64, seed: u64) -> Result<&TessellationResult<D, C>, TessellationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.sample(param, &mut rng)
    }
}

/// A tessellation engine whose dimension was chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyTessellation {
    Planar(PlanarTessellation),
    Spatial(SpatialTessellation),
}

/// Borrowed view of the sample held by an [`AnyTessellation`].
#[derive(Debug, Clone, Copy)]
pub enum AnyResult<'a> {
    Planar(&'a TessellationResult<2, ConvexPolygon>),
    Spatial(&'a TessellationResult<3, ConvexPolyhedron>),
}

impl AnyTessellation {
    /// Engine on the box `[min, max]`; the dimension is `min.len()`.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension` unless the dimension is 2 or 3
    /// - `InvalidDomain` if the corners differ in length or do not span a box
    /// - direction-matrix errors as for [`Tessellation::new`]
    pub fn with_bounds(
        kind: ProcessKind,
        min: &[f64],
        max: &[f64],
        direction_matrix: Option<&[Vec<f64>]>,
    ) -> Result<Self, TessellationError> {
        if min.len() != max.len() {
            return Err(TessellationError::InvalidDomain(format!(
                "corners have {} and {} coordinates",
                min.len(),
                max.len()
            )));
        }
        match min.len() {
            2 => Ok(AnyTessellation::Planar(Tessellation::with_bounds(
                kind,
                box_from_slices(min, max)?,
                direction_matrix,
            )?)),
            3 => Ok(AnyTessellation::Spatial(Tessellation::with_bounds(
                kind,
                box_from_slices(min, max)?,
                direction_matrix,
            )?)),
            dim => Err(TessellationError::InvalidDimension(dim)),
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            AnyTessellation::Planar(_) => 2,
            AnyTessellation::Spatial(_) => 3,
        }
    }

    pub fn kind(&self) -> ProcessKind {
        match self {
            AnyTessellation::Planar(t) => t.kind(),
            AnyTessellation::Spatial(t) => t.kind(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        match self {
            AnyTessellation::Planar(t) => t.notices(),
            AnyTessellation::Spatial(t) => t.notices(),
        }
    }

    pub fn result(&self) -> Option<AnyResult<'_>> {
        match self {
            AnyTessellation::Planar(t) => t.result().map(AnyResult::Planar),
            AnyTessellation::Spatial(t) => t.result().map(AnyResult::Spatial),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&mut self, param: f64, rng: &mut R) -> Result<AnyResult<'_>, TessellationError> {
        match self {
            AnyTessellation::Planar(t) => t.sample(param, rng).map(AnyResult::Planar),
            AnyTessellation::Spatial(t) => t.sample(param, rng).map(AnyResult::Spatial),
        }
    }

    pub fn sample_seeded(&mut self, param: f64, seed: u64) -> Result<AnyResult<'_>, TessellationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.sample(param, &mut rng)
    }
}

impl AnyResult<'_> {
    pub fn dim(&self) -> usize {
        match self {
            AnyResult::Planar(_) => 2,
            AnyResult::Spatial(_) => 3,
        }
    }

    pub fn cell_count(&self) -> usize {
        match self {
            AnyResult::Planar(r) => r.cell_count(),
            AnyResult::Spatial(r) => r.cell_count(),
        }
    }

    pub fn hyperplane_count(&self) -> usize {
        match self {
            AnyResult::Planar(r) => r.hyperplane_count(),
            AnyResult::Spatial(r) => r.hyperplane_count(),
        }
    }

    pub fn total_measure(&self) -> f64 {
        match self {
            AnyResult::Planar(r) => r.total_measure(),
            AnyResult::Spatial(r) => r.total_measure(),
        }
    }
}

fn box_from_slices<const D: usize>(min: &[f64], max: &[f64]) -> Result<BoundingBox<D>, TessellationError> {
    let corner = |c: &[f64]| -> Result<[f64; D], TessellationError> {
        c.try_into().map_err(|_| {
            TessellationError::InvalidDomain(format!("expected {} coordinates, got {}", D, c.len()))
        })
    };
    BoundingBox::new(corner(min)?, corner(max)?)
}

/// Builds an engine on the unit square (`dim = 2`) or cube (`dim = 3`).
///
/// # Errors
///
/// Returns `InvalidDimension` for any other `dim`, and direction-matrix
/// validation errors for processes that use the matrix.
pub fn make_tessellation(
    kind: ProcessKind,
    dim: usize,
    direction_matrix: Option<&[Vec<f64>]>,
) -> Result<AnyTessellation, TessellationError> {
    match dim {
        2 => Ok(AnyTessellation::Planar(Tessellation::new(kind, direction_matrix)?)),
        3 => Ok(AnyTessellation::Spatial(Tessellation::new(kind, direction_matrix)?)),
        _ => Err(TessellationError::InvalidDimension(dim)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn rejects_bad_dimension() {
        for dim in [0, 1, 4] {
            let err = make_tessellation(ProcessKind::Stit, dim, None).unwrap_err();
            assert_eq!(err, TessellationError::InvalidDimension(dim));
        }
    }

    #[test]
    fn rejects_bad_parameter() {
        let mut t = PlanarTessellation::new(ProcessKind::Poisson, None).unwrap();
        for param in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = t.sample_seeded(param, 1).unwrap_err();
            assert!(matches!(err, TessellationError::InvalidParameter(_)));
        }
        assert!(t.result().is_none());
    }

    #[test]
    fn propagates_matrix_errors() {
        let m = matrix(&[&[1.0, 0.0, 0.0]]);
        let err = make_tessellation(ProcessKind::Stit, 2, Some(&m)).unwrap_err();
        assert_eq!(
            err,
            TessellationError::DirectionColumnMismatch {
                row: 0,
                expected: 2,
                found: 3
            }
        );

        let zero = matrix(&[&[0.0, 0.0]]);
        let err = make_tessellation(ProcessKind::Poisson, 2, Some(&zero)).unwrap_err();
        assert_eq!(err, TessellationError::NoPositiveDirections);
    }

    #[test]
    fn mondrian_ignores_matrix() {
        let m = matrix(&[&[1.0, 1.0, 0.0]]);
        let mut t = SpatialTessellation::new(ProcessKind::Mondrian, Some(&m)).unwrap();
        assert_eq!(
            t.notices(),
            &[Notice::DirectionsIgnored {
                kind: ProcessKind::Mondrian
            }]
        );
        assert!(t.directions().is_isotropic());

        let result = t.sample_seeded(3.0, 7).unwrap();
        assert!(result.hyperplane_count() > 0);
        assert!(result.hyperplanes().iter().all(|h| h.axis().is_some()));
    }

    #[test]
    fn mondrian_ignores_invalid_matrix() {
        let m = matrix(&[&[f64::NAN]]);
        let t = make_tessellation(ProcessKind::Mondrian, 2, Some(&m)).unwrap();
        assert_eq!(t.notices().len(), 1);
    }

    #[test]
    fn poisson_uses_configured_directions() {
        let m = matrix(&[&[3.0, 0.0], &[0.0, 1.0]]);
        let mut t = PlanarTessellation::new(ProcessKind::Poisson, Some(&m)).unwrap();
        assert_eq!(t.notices(), &[Notice::DirectionsRenormalized { total_weight: 4.0 }]);
        assert_eq!(t.directions().probabilities(), &[0.75, 0.25]);

        let result = t.sample_seeded(20.0, 3).unwrap();
        for h in result.hyperplanes() {
            assert!(h.normal() == [1.0, 0.0] || h.normal() == [0.0, 1.0]);
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let mut a = SpatialTessellation::new(ProcessKind::Stit, None).unwrap();
        let mut b = SpatialTessellation::new(ProcessKind::Stit, None).unwrap();
        let ra = a.sample_seeded(6.0, 99).unwrap().clone();
        let rb = b.sample_seeded(6.0, 99).unwrap();
        assert_eq!(ra.cells(), rb.cells());
        assert_eq!(ra.hyperplanes(), rb.hyperplanes());
    }

    #[test]
    fn resampling_replaces_result() {
        let mut t = PlanarTessellation::new(ProcessKind::Stit, None).unwrap();
        t.sample_seeded(0.5, 1).unwrap();
        let cells = t.sample_seeded(15.0, 2).unwrap().cell_count();
        assert_eq!(t.result().map(|r| r.cell_count()), Some(cells));
    }

    #[test]
    fn custom_bounds() {
        let mut t = AnyTessellation::with_bounds(ProcessKind::Poisson, &[-1.0, -1.0, 0.0], &[1.0, 1.0, 2.0], None)
            .unwrap();
        assert_eq!(t.dim(), 3);
        let result = t.sample_seeded(1.0, 5).unwrap();
        assert_eq!(result.dim(), 3);
        assert!((result.total_measure() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn custom_bounds_errors() {
        let err = AnyTessellation::with_bounds(ProcessKind::Stit, &[0.0, 0.0], &[1.0], None).unwrap_err();
        assert!(matches!(err, TessellationError::InvalidDomain(_)));

        let err = AnyTessellation::with_bounds(ProcessKind::Stit, &[0.0; 4], &[1.0; 4], None).unwrap_err();
        assert_eq!(err, TessellationError::InvalidDimension(4));

        let err = AnyTessellation::with_bounds(ProcessKind::Stit, &[1.0, 0.0], &[0.0, 1.0], None).unwrap_err();
        assert!(matches!(err, TessellationError::InvalidDomain(_)));
    }

    #[test]
    fn any_tessellation_dispatch() {
        let mut t = make_tessellation(ProcessKind::Mondrian, 2, None).unwrap();
        assert_eq!(t.kind(), ProcessKind::Mondrian);
        assert!(t.result().is_none());
        let result = t.sample_seeded(4.0, 8).unwrap();
        assert!(result.cell_count() > 1);
        assert!((result.total_measure() - 1.0).abs() < 1e-9);
    }
}
