//! Fixture types for merge-forest property tests.

use crate::grid::ScalarGrid;

/// Value distribution used when generating a grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ValueDistribution {
    /// Values drawn from a continuous range; ties are practically absent.
    Continuous,
    /// Values drawn from a small pool, producing many ties.
    Plateaus,
    /// Every cell holds the same value.
    Flat,
    /// Low wells on a high background, producing many isolated births.
    Wells,
}

/// Generated grid together with the parameters that produced it.
#[derive(Clone, Debug)]
pub(super) struct GridFixture {
    pub grid: ScalarGrid,
    pub distribution: ValueDistribution,
    pub seed: u64,
}
