//! Ascending sweep over the grid.
//!
//! Cells are visited by value with the row-major index as tie-break. Each
//! visit consults the up and left neighbours that were already swept,
//! resolves them through the union-find, and either starts a region, joins
//! one, or merges two.

use std::collections::BTreeSet;

use tracing::trace;

use crate::grid::{GridPoint, ScalarGrid};

use super::graph::{MergeEdge, MergeGraph};
use super::union_find::DisjointSet;

/// What happened when one cell was swept.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SweepOutcome {
    /// No swept neighbour; the cell starts a region and becomes a root.
    Birth,
    /// The cell joined the region named by `representative`.
    Join {
        /// Representative of the joined region.
        representative: GridPoint,
    },
    /// The up and left neighbours belonged to different regions.
    Merge {
        /// Representative of the up neighbour, which names the merged region.
        survivor: GridPoint,
        /// Representative of the left neighbour, removed from the roots.
        absorbed: GridPoint,
    },
}

/// Record of a single sweep step passed to a [`SweepObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepStep {
    /// Zero-based position in sweep order.
    pub position: usize,
    /// The visited cell.
    pub point: GridPoint,
    /// Value of the visited cell.
    pub value: f64,
    /// Effect of the visit on the region structure.
    pub outcome: SweepOutcome,
    /// Size of the root set after the step.
    pub root_count: usize,
}

/// Receives every step of a sweep in order.
///
/// `()` is the no-op observer.
pub trait SweepObserver {
    /// Called once per swept cell, after the step has been applied.
    fn on_step(&mut self, step: &SweepStep);
}

impl SweepObserver for () {
    fn on_step(&mut self, _step: &SweepStep) {}
}

/// Observer that keeps every step.
///
/// # Examples
/// ```
/// use toposurf_core::{MergeForest, ScalarGrid, SweepOutcome, SweepTrace};
///
/// let grid = ScalarGrid::from_rows(vec![vec![0.0, 1.0]])?;
/// let mut trace = SweepTrace::default();
/// let forest = MergeForest::build_with_observer(&grid, &mut trace);
/// assert_eq!(trace.steps().len(), 2);
/// assert_eq!(trace.steps()[0].outcome, SweepOutcome::Birth);
/// assert_eq!(forest.roots().len(), 1);
/// # Ok::<(), toposurf_core::GridError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepTrace {
    steps: Vec<SweepStep>,
}

impl SweepTrace {
    /// Steps in sweep order.
    #[must_use]
    pub fn steps(&self) -> &[SweepStep] {
        &self.steps
    }
}

impl SweepObserver for SweepTrace {
    fn on_step(&mut self, step: &SweepStep) {
        self.steps.push(*step);
    }
}

/// Counters accumulated over one sweep.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SweepStats {
    /// Cells visited.
    pub points: usize,
    /// Cells that started a new region.
    pub births: usize,
    /// Cells attached to an existing region without a merge.
    pub joins: usize,
    /// Merge events.
    pub merges: usize,
}

impl SweepStats {
    /// Union operations performed: every join plus every merge.
    #[must_use]
    pub const fn union_events(&self) -> usize {
        self.joins + self.merges
    }
}

/// Row-major indices sorted by value, ties broken by index.
pub(super) fn sweep_order(grid: &ScalarGrid) -> Vec<usize> {
    let values = grid.values();
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_unstable_by(|&left, &right| {
        values[left]
            .total_cmp(&values[right])
            .then(left.cmp(&right))
    });
    order
}

pub(super) struct Sweep<'g> {
    grid: &'g ScalarGrid,
    dsu: DisjointSet,
    visited: Vec<bool>,
    roots: BTreeSet<GridPoint>,
    graph: MergeGraph,
    stats: SweepStats,
}

impl<'g> Sweep<'g> {
    pub(super) fn new(grid: &'g ScalarGrid) -> Self {
        Self {
            grid,
            dsu: DisjointSet::new(grid.len()),
            visited: vec![false; grid.len()],
            roots: BTreeSet::new(),
            graph: MergeGraph::default(),
            stats: SweepStats::default(),
        }
    }

    pub(super) fn run<O: SweepObserver + ?Sized>(
        mut self,
        observer: &mut O,
    ) -> (MergeGraph, BTreeSet<GridPoint>, SweepStats) {
        for (position, index) in sweep_order(self.grid).into_iter().enumerate() {
            let step = self.visit(position, index);
            observer.on_step(&step);
        }
        (self.graph, self.roots, self.stats)
    }

    fn visit(&mut self, position: usize, index: usize) -> SweepStep {
        let point = self.point_of(index);
        let value = self.grid.values()[index];
        let up = self.resolve(point.up());
        let left = self.resolve(point.left());

        let outcome = match (up, left) {
            (Some(survivor), Some(absorbed)) if survivor != absorbed => {
                self.dsu.union_into(survivor, absorbed);
                self.dsu.union_into(survivor, index);
                let survivor = self.point_of(survivor);
                let absorbed = self.point_of(absorbed);
                self.roots.remove(&absorbed);
                self.graph
                    .record(MergeEdge::new(survivor, absorbed, value, position));
                self.stats.merges += 1;
                trace!(%survivor, %absorbed, level = value, "regions merged");
                SweepOutcome::Merge { survivor, absorbed }
            }
            (Some(representative), _) | (None, Some(representative)) => {
                self.dsu.union_into(representative, index);
                self.stats.joins += 1;
                SweepOutcome::Join {
                    representative: self.point_of(representative),
                }
            }
            (None, None) => {
                self.graph.add_node(point);
                self.stats.births += 1;
                SweepOutcome::Birth
            }
        };

        self.visited[index] = true;
        self.stats.points += 1;
        let representative = self.dsu.representative(index);
        let representative = self.point_of(representative);
        self.roots.insert(representative);

        SweepStep {
            position,
            point,
            value,
            outcome,
            root_count: self.roots.len(),
        }
    }

    /// Resolves a neighbour to its current representative index, or `None`
    /// when the neighbour does not exist or has not been swept yet.
    fn resolve(&mut self, neighbour: Option<GridPoint>) -> Option<usize> {
        let neighbour = neighbour?;
        let index = self.index_of(neighbour);
        if !self.visited[index] {
            return None;
        }
        Some(self.dsu.representative(index))
    }

    fn index_of(&self, point: GridPoint) -> usize {
        match self.grid.index_of(point) {
            Some(index) => index,
            None => panic!(
                "sweep referenced {point} outside a {}x{} grid",
                self.grid.rows(),
                self.grid.cols()
            ),
        }
    }

    fn point_of(&self, index: usize) -> GridPoint {
        match self.grid.point_at(index) {
            Some(point) => point,
            None => panic!(
                "sweep referenced index {index} outside a grid of {} cells",
                self.grid.len()
            ),
        }
    }
}
