//! Immutable scalar grids and grid coordinates.
//!
//! A [`ScalarGrid`] is validated once on construction: it is non-empty,
//! rectangular and holds only finite values. Every downstream consumer
//! (the merge-forest sweep, the filtered complex, the scene export) relies on
//! these guarantees instead of re-checking them.

use std::fmt;

use crate::error::GridError;

/// A `(row, col)` coordinate identifying one grid cell.
///
/// Points order lexicographically by row and then column, which is the
/// tie-break used whenever two cells hold the same value.
///
/// # Examples
/// ```
/// use toposurf_core::GridPoint;
///
/// let a = GridPoint::new(0, 5);
/// let b = GridPoint::new(1, 0);
/// assert!(a < b);
/// assert_eq!(a.up(), None);
/// assert_eq!(b.up(), Some(GridPoint::new(0, 0)));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridPoint {
    row: usize,
    col: usize,
}

impl GridPoint {
    /// Creates a point from its row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the neighbour one row above, if any.
    #[must_use]
    pub const fn up(self) -> Option<Self> {
        match self.row.checked_sub(1) {
            Some(row) => Some(Self::new(row, self.col)),
            None => None,
        }
    }

    /// Returns the neighbour one column to the left, if any.
    #[must_use]
    pub const fn left(self) -> Option<Self> {
        match self.col.checked_sub(1) {
            Some(col) => Some(Self::new(self.row, col)),
            None => None,
        }
    }
}

impl From<(usize, usize)> for GridPoint {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only, row-major 2D array of finite `f64` values.
///
/// `-0.0` is stored as `0.0` so that the two zeros order as equal values and
/// fall back to the coordinate tie-break.
///
/// # Examples
/// ```
/// use toposurf_core::{GridPoint, ScalarGrid};
///
/// let grid = ScalarGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 2);
/// assert_eq!(grid.value(GridPoint::new(1, 0)), Some(3.0));
/// # Ok::<(), toposurf_core::GridError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ScalarGrid {
    /// Builds a grid from nested rows.
    ///
    /// # Errors
    /// Returns [`GridError::Empty`] when `rows` is empty,
    /// [`GridError::EmptyRow`] when the first row is empty,
    /// [`GridError::Ragged`] when row widths differ, and
    /// [`GridError::NonFinite`] for NaN or infinite entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        if width == 0 {
            return Err(GridError::EmptyRow { row: 0 });
        }

        let mut values = Vec::with_capacity(height.saturating_mul(width));
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.is_empty() {
                return Err(GridError::EmptyRow { row });
            }
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
            values.extend(cells);
        }

        Self::from_vec(height, width, values)
    }

    /// Builds a grid from a row-major buffer.
    ///
    /// # Errors
    /// Returns [`GridError::Empty`] when either dimension is zero,
    /// [`GridError::SizeMismatch`] when `values.len() != rows * cols`, and
    /// [`GridError::NonFinite`] for NaN or infinite entries.
    pub fn from_vec(rows: usize, cols: usize, mut values: Vec<f64>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let expected = rows.checked_mul(cols).ok_or(GridError::SizeMismatch {
            expected: usize::MAX,
            actual: values.len(),
        })?;
        if values.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }

        for (index, value) in values.iter_mut().enumerate() {
            if !value.is_finite() {
                return Err(GridError::NonFinite {
                    row: index / cols,
                    col: index % cols,
                    value: *value,
                });
            }
            if *value == 0.0 {
                *value = 0.0;
            }
        }

        Ok(Self { rows, cols, values })
    }

    /// Number of rows (`H`).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`W`).
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; validated grids hold at least one cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major view of the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns whether `point` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, point: GridPoint) -> bool {
        point.row() < self.rows && point.col() < self.cols
    }

    /// Row-major index of `point`, or `None` when it lies outside the grid.
    #[must_use]
    pub const fn index_of(&self, point: GridPoint) -> Option<usize> {
        if self.contains(point) {
            Some(point.row() * self.cols + point.col())
        } else {
            None
        }
    }

    /// Inverse of [`Self::index_of`].
    #[must_use]
    pub const fn point_at(&self, index: usize) -> Option<GridPoint> {
        if index < self.values.len() {
            Some(GridPoint::new(index / self.cols, index % self.cols))
        } else {
            None
        }
    }

    /// Value at `point`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn value(&self, point: GridPoint) -> Option<f64> {
        self.index_of(point)
            .and_then(|index| self.values.get(index).copied())
    }

    /// Iterates over every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| GridPoint::new(row, col)))
    }
}
