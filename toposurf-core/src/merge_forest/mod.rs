//! Merge-forest (join tree) construction over a scalar grid.
//!
//! The builder sweeps the grid in ascending value order and tracks the
//! connected regions of the sub-level set seen so far:
//!
//! - A cell with no swept up or left neighbour starts a region and becomes a
//!   root.
//! - A cell whose swept neighbours share a region joins it.
//! - A cell whose up and left neighbours resolve to different regions merges
//!   them. The up neighbour's representative survives, the left neighbour's
//!   representative leaves the root set, and a merge edge is recorded.
//!
//! Region lookups go through a path-compressing union-find, so a cell always
//! resolves to its region's current representative even after chained merges.
//! The merge history is kept apart from the resolver and is append-only.
//!
//! The sweep is sequential: every decision depends on all lower-valued cells.
//! All state is owned by a single call.

mod graph;
mod sweep;
mod union_find;

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::error::GridError;
use crate::grid::{GridPoint, ScalarGrid};

pub use self::graph::{MergeEdge, MergeGraph};
pub use self::sweep::{SweepObserver, SweepOutcome, SweepStats, SweepStep, SweepTrace};

use self::sweep::Sweep;

/// Merge graph and surviving roots produced by one sweep.
///
/// # Examples
/// ```
/// use toposurf_core::{GridPoint, MergeForest, ScalarGrid};
///
/// let grid = ScalarGrid::from_rows(vec![
///     vec![5.0, 5.0, 5.0],
///     vec![5.0, 9.0, 5.0],
///     vec![0.0, 9.0, 1.0],
/// ])?;
/// let forest = MergeForest::build(&grid);
/// assert_eq!(forest.roots().len(), 2);
/// assert!(!forest
///     .graph()
///     .contains_edge(GridPoint::new(2, 0), GridPoint::new(2, 2)));
/// # Ok::<(), toposurf_core::GridError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MergeForest {
    graph: MergeGraph,
    roots: BTreeSet<GridPoint>,
    stats: SweepStats,
}

impl MergeForest {
    /// Sweeps `grid` and returns the merge graph and root set.
    ///
    /// Grids are validated on construction, so the sweep cannot fail.
    #[must_use]
    pub fn build(grid: &ScalarGrid) -> Self {
        Self::build_with_observer(grid, &mut ())
    }

    /// Sweeps `grid`, reporting every step to `observer`.
    #[instrument(
        name = "core.merge_forest.build",
        skip(grid, observer),
        fields(rows = grid.rows(), cols = grid.cols()),
    )]
    pub fn build_with_observer<O: SweepObserver + ?Sized>(
        grid: &ScalarGrid,
        observer: &mut O,
    ) -> Self {
        let (graph, roots, stats) = Sweep::new(grid).run(observer);
        record_metrics(&stats);
        info!(
            roots = roots.len(),
            births = stats.births,
            merges = stats.merges,
            "merge forest built"
        );
        Self {
            graph,
            roots,
            stats,
        }
    }

    /// Validates `rows` and sweeps the resulting grid.
    ///
    /// # Errors
    /// Returns [`GridError`] when `rows` is empty, ragged or holds non-finite
    /// values. No sweep state is created in that case.
    ///
    /// # Examples
    /// ```
    /// use toposurf_core::{GridError, MergeForest};
    ///
    /// let forest = MergeForest::from_rows(vec![vec![1.0]])?;
    /// assert_eq!(forest.roots().len(), 1);
    /// assert_eq!(forest.graph().edge_count(), 0);
    ///
    /// let err = MergeForest::from_rows(vec![vec![1.0, f64::NAN]]).unwrap_err();
    /// assert!(matches!(err, GridError::NonFinite { .. }));
    /// # Ok::<(), GridError>(())
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let grid = ScalarGrid::from_rows(rows)?;
        Ok(Self::build(&grid))
    }

    /// Append-only merge history.
    #[must_use]
    pub const fn graph(&self) -> &MergeGraph {
        &self.graph
    }

    /// Representatives that were never absorbed.
    #[must_use]
    pub const fn roots(&self) -> &BTreeSet<GridPoint> {
        &self.roots
    }

    /// Counters accumulated during the sweep.
    #[must_use]
    pub const fn stats(&self) -> SweepStats {
        self.stats
    }

    /// Splits the forest into its merge graph and root set.
    #[must_use]
    pub fn into_parts(self) -> (MergeGraph, BTreeSet<GridPoint>) {
        (self.graph, self.roots)
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(stats: &SweepStats) {
    metrics::counter!("merge_forest_births_total").increment(stats.births as u64);
    metrics::counter!("merge_forest_merges_total").increment(stats.merges as u64);
}

#[cfg(not(feature = "metrics"))]
const fn record_metrics(_stats: &SweepStats) {}


#[cfg(test)]
mod property;
