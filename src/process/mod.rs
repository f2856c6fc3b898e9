//! Stochastic hyperplane processes.
//!
//! Three processes partition a convex domain:
//!
//! - [`PoissonProcess`] draws a Poisson number of independent hyperplanes
//!   and clips the domain by all of them.
//! - [`StitProcess`] lets every cell split after an exponential waiting time
//!   whose rate is the cell's measure, until a stop time.
//! - [`MondrianProcess`] follows the same clock with rate equal to the sum
//!   of the cell's side lengths and only cuts along coordinate axes.
//!
//! The recursive pair shares one driver and differs only in its
//! [`SplitRule`]. Each lineage draws from its own random stream, so
//! the order in which the work queue visits cells never changes the result.

mod lineage;
mod mondrian;
mod poisson;
mod recursive;
mod result;
mod stit;


use std::fmt::Display;
use std::str::FromStr;

use rand::Rng;

use crate::error::TessellationError;
use crate::geometry::ConvexRegion;

pub use lineage::{Fate, LineageNode, SplitLineage, TerminalReason};
pub use mondrian::MondrianProcess;
pub use poisson::PoissonProcess;
pub use recursive::{PendingCell, SplitRule};
pub use result::TessellationResult;
pub use stit::StitProcess;

/// The closed set of supported processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProcessKind {
    Poisson,
    Stit,
    Mondrian,
}

impl ProcessKind {
    /// Name of the sampling parameter this process takes.
    pub const fn parameter_name(self) -> &'static str {
        match self {
            ProcessKind::Poisson => "lam",
            ProcessKind::Stit | ProcessKind::Mondrian => "stop_time",
        }
    }

    /// Default sampling parameter: intensity 10 or stop time 20.
    pub const fn default_parameter(self) -> f64 {
        match self {
            ProcessKind::Poisson => 10.0,
            ProcessKind::Stit | ProcessKind::Mondrian => 20.0,
        }
    }

    /// Returns true if the process draws normals from a direction
    /// distribution.
    pub const fn uses_directions(self) -> bool {
        !matches!(self, ProcessKind::Mondrian)
    }
}

impl Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProcessKind::Poisson => "poisson",
            ProcessKind::Stit => "stit",
            ProcessKind::Mondrian => "mondrian",
        };
        f.write_str(name)
    }
}

impl FromStr for ProcessKind {
    type Err = TessellationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poisson" => Ok(ProcessKind::Poisson),
            "stit" => Ok(ProcessKind::Stit),
            "mondrian" => Ok(ProcessKind::Mondrian),
            _ => Err(TessellationError::UnknownProcess(s.to_string())),
        }
    }
}

/// A process that partitions a convex domain.
///
/// `param` is the intensity for Poisson processes and the stop time for
/// recursive ones. Implementations never fail: geometric trouble is
/// absorbed by keeping cells whole. Validation of `param` is the caller's
/// job; a zero parameter yields the unsplit domain.
pub trait HyperplaneProcess<const D: usize, C: ConvexRegion<D>> {
    fn generate<R: Rng + ?Sized>(&self, domain: &C, param: f64, rng: &mut R) -> TessellationResult<D, C>;
}
