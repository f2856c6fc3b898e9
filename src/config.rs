//! Plain configuration for a sampling run.

use crate::error::TessellationError;
use crate::process::ProcessKind;
use crate::tessellation::{make_tessellation, AnyTessellation};

/// Everything needed to build an engine and draw one sample.
///
/// Fields left as `None` fall back to the unit domain, isotropic directions,
/// the process's default parameter, and an entropy-seeded generator.
#[derive(Debug, Clone, PartialEq)]
pub struct TessellationConfig {
    /// Process to run.
    pub kind: ProcessKind,
    /// Dimension of the domain, 2 or 3.
    pub dim: usize,
    /// Lower and upper domain corners. Defaults to `[0, 1]^dim`.
    pub bounds: Option<(Vec<f64>, Vec<f64>)>,
    /// Rows are directions, row norms their weights. Ignored by Mondrian.
    pub direction_matrix: Option<Vec<Vec<f64>>>,
    /// `lam` for Poisson, `stop_time` otherwise.
    pub param: Option<f64>,
    /// Seed for `ChaCha8Rng`; `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl TessellationConfig {
    pub fn new(kind: ProcessKind, dim: usize) -> Self {
        Self {
            kind,
            dim,
            ..Self::default()
        }
    }

    /// The sampling parameter, or the process default.
    pub fn param_or_default(&self) -> f64 {
        self.param.unwrap_or_else(|| self.kind.default_parameter())
    }

    /// Builds the engine described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomain` if `bounds` does not have `dim` coordinates
    /// per corner, plus any error of [`make_tessellation`] or
    /// [`AnyTessellation::with_bounds`].
    pub fn build(&self) -> Result<AnyTessellation, TessellationError> {
        let matrix = self.direction_matrix.as_deref();
        match &self.bounds {
            None => make_tessellation(self.kind, self.dim, matrix),
            Some((min, max)) => {
                if min.len() != self.dim {
                    return Err(TessellationError::InvalidDomain(format!(
                        "bounds have {} coordinates, dimension is {}",
                        min.len(),
                        self.dim
                    )));
                }
                AnyTessellation::with_bounds(self.kind, min, max, matrix)
            }
        }
    }

    /// Builds the engine and draws one sample into it.
    pub fn run(&self) -> Result<AnyTessellation, TessellationError> {
        let mut tessellation = self.build()?;
        let seed = self.seed.unwrap_or_else(rand::random);
        tessellation.sample_seeded(self.param_or_default(), seed)?;
        Ok(tessellation)
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            kind: ProcessKind::Stit,
            dim: 2,
            bounds: None,
            direction_matrix: None,
            param: None,
            seed: None,
        }
    }
}
