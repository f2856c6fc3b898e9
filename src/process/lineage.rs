use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Why a cell stopped evolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    /// The splitting rate was numerically zero.
    Negligible,
    /// The next split would have happened after the stop time.
    Expired,
    /// The cut produced fewer than two usable parts.
    DegenerateSplit,
}

/// State of one cell in a recursive run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fate {
    /// Still waiting in the work queue.
    Active,
    /// Final cell of the tessellation.
    Terminal(TerminalReason),
    /// Replaced by two children at `time`, cut by hyperplane number `hyperplane`.
    Split { hyperplane: usize, time: f64 },
}

/// One cell that existed at some point of a recursive run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineageNode {
    pub birth_time: f64,
    pub measure: f64,
    pub fate: Fate,
}

/// Genealogy of a STIT or Mondrian run.
///
/// Every cell ever created is a node; each split adds two edges
/// parent → child. The graph doubles as an arena: the work queue refers to
/// cells by [`NodeIndex`] instead of holding parent links.
///
/// # Invariants
///
/// - The graph is a binary tree rooted at the domain (node 0)
/// - A node has children iff its fate is [`Fate::Split`]
/// - Children are born at their parent's split time, which is strictly later
///   than the parent's birth time
#[derive(Debug, Clone, Default)]
pub struct SplitLineage {
    graph: DiGraph<LineageNode, ()>,
}

impl SplitLineage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the root cell (the domain) born at time zero.
    pub(crate) fn add_root(&mut self, measure: f64) -> NodeIndex {
        self.graph.add_node(LineageNode {
            birth_time: 0.0,
            measure,
            fate: Fate::Active,
        })
    }

    /// Adds an active child of `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeIndex, birth_time: f64, measure: f64) -> NodeIndex {
        let child = self.graph.add_node(LineageNode {
            birth_time,
            measure,
            fate: Fate::Active,
        });
        self.graph.add_edge(parent, child, ());
        child
    }

    pub(crate) fn set_fate(&mut self, node: NodeIndex, fate: Fate) {
        if let Some(weight) = self.graph.node_weight_mut(node) {
            weight.fate = fate;
        }
    }

    pub fn node(&self, index: NodeIndex) -> Option<&LineageNode> {
        self.graph.node_weight(index)
    }

    pub fn root(&self) -> Option<NodeIndex> {
        (self.graph.node_count() > 0).then(|| NodeIndex::new(0))
    }

    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .neighbors_directed(index, Direction::Outgoing)
            .collect()
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
    }

    /// Cells that ended the run, in node order.
    pub fn terminals(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&n| matches!(self.graph[n].fate, Fate::Terminal(_)))
            .collect()
    }

    /// Count of terminal cells that stopped for `reason`.
    pub fn terminal_count(&self, reason: TerminalReason) -> usize {
        self.graph
            .node_weights()
            .filter(|w| w.fate == Fate::Terminal(reason))
            .count()
    }

    pub fn split_count(&self) -> usize {
        self.graph
            .node_weights()
            .filter(|w| matches!(w.fate, Fate::Split { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of splits between `index` and the root.
    pub fn depth(&self, index: NodeIndex) -> usize {
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Checks that every edge goes strictly forward in time and that every
    /// child is born exactly at its parent's split time.
    pub fn is_time_consistent(&self) -> bool {
        self.graph.edge_references().all(|edge| {
            let parent = &self.graph[edge.source()];
            let child = &self.graph[edge.target()];
            match parent.fate {
                Fate::Split { time, .. } => {
                    child.birth_time > parent.birth_time && child.birth_time == time
                }
                _ => false,
            }
        })
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &DiGraph<LineageNode, ()> {
        &self.graph
    }
}
