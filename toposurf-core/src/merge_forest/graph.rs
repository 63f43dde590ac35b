//! Append-only merge history recorded by the sweep.

use std::collections::BTreeSet;

use crate::grid::GridPoint;

/// One merge event: `absorbed` stopped being canonical and its region now
/// resolves to `survivor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeEdge {
    survivor: GridPoint,
    absorbed: GridPoint,
    level: f64,
    step: usize,
}

impl MergeEdge {
    pub(super) const fn new(survivor: GridPoint, absorbed: GridPoint, level: f64, step: usize) -> Self {
        Self {
            survivor,
            absorbed,
            level,
            step,
        }
    }

    /// Representative that kept its identity.
    #[must_use]
    pub const fn survivor(&self) -> GridPoint {
        self.survivor
    }

    /// Representative that was subsumed.
    #[must_use]
    pub const fn absorbed(&self) -> GridPoint {
        self.absorbed
    }

    /// Scalar value of the cell whose visit triggered the merge.
    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }

    /// Zero-based position of that cell in sweep order.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Unordered endpoints, smaller point first.
    #[must_use]
    pub fn endpoints(&self) -> (GridPoint, GridPoint) {
        if self.survivor <= self.absorbed {
            (self.survivor, self.absorbed)
        } else {
            (self.absorbed, self.survivor)
        }
    }

    /// Returns whether the edge joins `a` and `b` in either direction.
    #[must_use]
    pub fn connects(&self, a: GridPoint, b: GridPoint) -> bool {
        (self.survivor == a && self.absorbed == b) || (self.survivor == b && self.absorbed == a)
    }
}

/// Undirected graph whose nodes are every representative the sweep created
/// and whose edges are merge events in sweep order.
///
/// Edges are never removed. A superseded representative keeps its historical
/// edges even though new lookups route to its survivor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeGraph {
    nodes: BTreeSet<GridPoint>,
    edges: Vec<MergeEdge>,
}

impl MergeGraph {
    pub(super) fn add_node(&mut self, point: GridPoint) {
        self.nodes.insert(point);
    }

    pub(super) fn record(&mut self, edge: MergeEdge) {
        self.nodes.insert(edge.survivor);
        self.nodes.insert(edge.absorbed);
        self.edges.push(edge);
    }

    /// Representatives ever created, in point order.
    #[must_use]
    pub const fn nodes(&self) -> &BTreeSet<GridPoint> {
        &self.nodes
    }

    /// Merge events in the order they happened.
    #[must_use]
    pub fn edges(&self) -> &[MergeEdge] {
        &self.edges
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of merge events.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether `a` and `b` were merged directly.
    #[must_use]
    pub fn contains_edge(&self, a: GridPoint, b: GridPoint) -> bool {
        self.edges.iter().any(|edge| edge.connects(a, b))
    }

    /// Points merged directly with `point`, in sweep order.
    pub fn neighbours(&self, point: GridPoint) -> impl Iterator<Item = GridPoint> + '_ {
        self.edges.iter().filter_map(move |edge| {
            if edge.survivor == point {
                Some(edge.absorbed)
            } else if edge.absorbed == point {
                Some(edge.survivor)
            } else {
                None
            }
        })
    }
}
