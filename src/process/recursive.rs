//! Shared driver for the time-stopped recursive processes.
//!
//! Every cell runs the same small state machine:
//!
//! 1. Pop `(cell, birth_time)` from a FIFO queue.
//! 2. If the cell's rate is negligible, it is terminal.
//! 3. Draw `lifetime ~ Exp(rate)`; if `birth_time + lifetime` exceeds the
//!    stop time, it is terminal.
//! 4. Otherwise ask the [`SplitRule`] for a hyperplane, record it, and split.
//!    Fewer than two parts makes the cell terminal; two parts are queued as
//!    children born at `birth_time + lifetime`.
//!
//! Termination: children never outmeasure their parent, lifetimes are
//! almost surely positive, and birth times strictly increase along every
//! lineage, so each lineage ends before the stop time almost surely.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};
use tracing::debug;

use super::lineage::{Fate, SplitLineage, TerminalReason};
use super::result::TessellationResult;
use crate::geometry::{ConvexRegion, Hyperplane};

/// How a recursive process rates and cuts a cell.
pub trait SplitRule<const D: usize, C: ConvexRegion<D>> {
    /// Rate of the exponential clock attached to `cell`.
    fn rate(&self, cell: &C) -> f64;

    /// Rates at or below this value count as zero.
    fn negligible_rate(&self) -> f64;

    /// Draws the hyperplane that cuts `cell`, or `None` if none can be drawn.
    fn propose<R: Rng + ?Sized>(&self, cell: &C, rng: &mut R) -> Option<Hyperplane<D>>;
}

/// A cell waiting in the work queue.
#[derive(Debug, Clone)]
pub struct PendingCell<C> {
    pub cell: C,
    pub birth_time: f64,
    /// Arena handle into the run's [`SplitLineage`].
    pub node: NodeIndex,
    /// Random stream owned by this lineage.
    stream: ChaCha8Rng,
}

/// Runs a recursive process on `domain` until `stop_time`.
///
/// The root stream is seeded from `rng`; every split seeds its children's
/// streams from the parent's, so a cell's draws depend only on its ancestry.
pub(crate) fn run<const D: usize, C, S, R>(
    rule: &S,
    domain: &C,
    stop_time: f64,
    rng: &mut R,
) -> TessellationResult<D, C>
where
    C: ConvexRegion<D>,
    S: SplitRule<D, C>,
    R: Rng + ?Sized,
{
    let mut lineage = SplitLineage::new();
    let mut cells = Vec::new();
    let mut hyperplanes = Vec::new();

    let root = lineage.add_root(domain.measure());
    let mut queue = VecDeque::from([PendingCell {
        cell: domain.clone(),
        birth_time: 0.0,
        node: root,
        stream: ChaCha8Rng::seed_from_u64(rng.gen()),
    }]);

    while let Some(mut pending) = queue.pop_front() {
        let rate = rule.rate(&pending.cell);
        if !(rate > rule.negligible_rate()) {
            lineage.set_fate(pending.node, Fate::Terminal(TerminalReason::Negligible));
            cells.push(pending.cell);
            continue;
        }

        let lifetime = match Exp::new(rate) {
            Ok(clock) => clock.sample(&mut pending.stream),
            Err(_) => f64::INFINITY,
        };
        let split_time = pending.birth_time + lifetime;
        if split_time > stop_time {
            lineage.set_fate(pending.node, Fate::Terminal(TerminalReason::Expired));
            cells.push(pending.cell);
            continue;
        }

        let Some(plane) = rule.propose(&pending.cell, &mut pending.stream) else {
            lineage.set_fate(pending.node, Fate::Terminal(TerminalReason::DegenerateSplit));
            cells.push(pending.cell);
            continue;
        };
        let hyperplane = hyperplanes.len();
        hyperplanes.push(plane);

        match pending.cell.try_split(&plane) {
            Some((below, above)) if split_time > pending.birth_time => {
                lineage.set_fate(
                    pending.node,
                    Fate::Split {
                        hyperplane,
                        time: split_time,
                    },
                );
                for child in [below, above] {
                    let node = lineage.add_child(pending.node, split_time, child.measure());
                    queue.push_back(PendingCell {
                        cell: child,
                        birth_time: split_time,
                        node,
                        stream: ChaCha8Rng::seed_from_u64(pending.stream.gen()),
                    });
                }
            }
            _ => {
                lineage.set_fate(pending.node, Fate::Terminal(TerminalReason::DegenerateSplit));
                cells.push(pending.cell);
            }
        }
    }

    debug!(
        cells = cells.len(),
        hyperplanes = hyperplanes.len(),
        splits = lineage.split_count(),
        stop_time,
        "recursive process finished"
    );
    TessellationResult::new(cells, hyperplanes, Some(lineage))
}
