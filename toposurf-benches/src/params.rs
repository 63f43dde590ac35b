//! Benchmark parameter labels.

use std::fmt;

/// Grid shape used to label a benchmark input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBenchParams {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridBenchParams {
    /// Square grid with `side` cells per axis.
    #[must_use]
    pub const fn square(side: usize) -> Self {
        Self {
            rows: side,
            cols: side,
        }
    }

    /// Number of cells.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
