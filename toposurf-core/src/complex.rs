//! Filtered simplicial complex over a scalar grid.
//!
//! Each grid cell becomes a vertex with id `row * cols + col`. Edges and
//! triangles take the maximum value of their vertices, so every simplex
//! enters the filtration no earlier than its faces.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::grid::ScalarGrid;

/// Largest number of vertices a simplex may span (a triangle).
pub const MAX_SIMPLEX_VERTICES: usize = 3;

/// Sorted, de-duplicated set of one to three vertex ids.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Builds a simplex from `vertices`.
    ///
    /// Returns `None` when no vertex is given or when more than
    /// [`MAX_SIMPLEX_VERTICES`] distinct vertices remain after de-duplication.
    ///
    /// # Examples
    /// ```
    /// use toposurf_core::Simplex;
    ///
    /// let simplex = Simplex::new([4, 1, 4]).expect("non-empty");
    /// assert_eq!(simplex.vertices(), &[1, 4]);
    /// assert_eq!(simplex.dimension(), 1);
    /// assert!(Simplex::new([]).is_none());
    /// assert!(Simplex::new([0, 1, 2, 3]).is_none());
    /// ```
    #[must_use]
    pub fn new(vertices: impl IntoIterator<Item = usize>) -> Option<Self> {
        let mut vertices: Vec<usize> = vertices.into_iter().collect();
        if vertices.is_empty() {
            return None;
        }
        vertices.sort_unstable();
        vertices.dedup();
        if vertices.len() > MAX_SIMPLEX_VERTICES {
            return None;
        }
        Some(Self { vertices })
    }

    /// Zero-dimensional simplex.
    #[must_use]
    pub fn vertex(id: usize) -> Self {
        Self { vertices: vec![id] }
    }

    /// Edge between `a` and `b`; collapses to a vertex when they are equal.
    #[must_use]
    pub fn edge(a: usize, b: usize) -> Self {
        Self::from_pair_or_triple(&[a, b])
    }

    /// Triangle spanned by `a`, `b` and `c`.
    #[must_use]
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self::from_pair_or_triple(&[a, b, c])
    }

    fn from_pair_or_triple(ids: &[usize]) -> Self {
        let mut vertices = ids.to_vec();
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// Vertex ids in ascending order.
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of vertices minus one.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Codimension-one faces; empty for a vertex.
    pub fn boundary(&self) -> impl Iterator<Item = Self> + '_ {
        let faces = if self.vertices.len() > 1 {
            self.vertices.len()
        } else {
            0
        };
        (0..faces).map(move |omitted| Self {
            vertices: self
                .vertices
                .iter()
                .enumerate()
                .filter(|&(position, _)| position != omitted)
                .map(|(_, &vertex)| vertex)
                .collect(),
        })
    }
}

/// How grid cells are split into simplices.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Triangulation {
    /// Grid edges, the anti-diagonal of each cell and two triangles per cell.
    #[default]
    Standard,
    /// [`Triangulation::Standard`] plus the main diagonal of each cell.
    Detailed,
}

/// Simplices keyed to the value at which they enter the filtration.
///
/// # Examples
/// ```
/// use toposurf_core::{FilteredComplex, ScalarGrid, Simplex, Triangulation};
///
/// let grid = ScalarGrid::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// let complex = FilteredComplex::from_grid(&grid, Triangulation::Standard);
/// assert_eq!(complex.count(2), 2);
/// assert_eq!(complex.filtration_of(&Simplex::edge(0, 3)), None);
/// assert_eq!(complex.filtration_of(&Simplex::edge(1, 2)), Some(2.0));
/// assert_eq!(complex.euler_characteristic(), 1);
/// # Ok::<(), toposurf_core::GridError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredComplex {
    simplices: BTreeMap<Simplex, f64>,
}

impl FilteredComplex {
    /// Creates an empty complex.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `simplex` and all of its faces at `filtration`.
    ///
    /// A simplex that is already present keeps the lower of its current and
    /// the new filtration value. Non-finite values are ignored. Returns `true`
    /// when anything changed.
    pub fn insert(&mut self, simplex: Simplex, filtration: f64) -> bool {
        if !filtration.is_finite() {
            return false;
        }
        match self.simplices.get(&simplex) {
            Some(&current) if current <= filtration => return false,
            _ => {}
        }
        let faces: Vec<Simplex> = simplex.boundary().collect();
        self.simplices.insert(simplex, filtration);
        for face in faces {
            self.insert(face, filtration);
        }
        true
    }

    /// Builds the filtration of `grid` under `triangulation`.
    #[instrument(
        name = "core.complex.from_grid",
        skip(grid),
        fields(rows = grid.rows(), cols = grid.cols()),
    )]
    #[must_use]
    pub fn from_grid(grid: &ScalarGrid, triangulation: Triangulation) -> Self {
        let cols = grid.cols();
        let values = grid.values();
        let id = |row: usize, col: usize| row * cols + col;
        let level = |ids: &[usize]| {
            ids.iter()
                .map(|&vertex| values[vertex])
                .fold(f64::NEG_INFINITY, f64::max)
        };

        let mut complex = Self::new();
        for (vertex, &value) in values.iter().enumerate() {
            complex.insert(Simplex::vertex(vertex), value);
        }
        for row in 0..grid.rows() {
            for col in 0..cols {
                let here = id(row, col);
                if col + 1 < cols {
                    let right = id(row, col + 1);
                    complex.insert(Simplex::edge(here, right), level(&[here, right]));
                }
                if row + 1 < grid.rows() {
                    let below = id(row + 1, col);
                    complex.insert(Simplex::edge(here, below), level(&[here, below]));
                }
            }
        }
        for row in 0..grid.rows().saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                let top_left = id(row, col);
                let top_right = id(row, col + 1);
                let bottom_left = id(row + 1, col);
                let bottom_right = id(row + 1, col + 1);
                if triangulation == Triangulation::Detailed {
                    complex.insert(
                        Simplex::edge(top_left, bottom_right),
                        level(&[top_left, bottom_right]),
                    );
                }
                complex.insert(
                    Simplex::triangle(top_left, bottom_left, top_right),
                    level(&[top_left, bottom_left, top_right]),
                );
                complex.insert(
                    Simplex::triangle(bottom_left, top_right, bottom_right),
                    level(&[bottom_left, top_right, bottom_right]),
                );
            }
        }
        debug!(
            simplices = complex.len(),
            triangles = complex.count(2),
            "complex built"
        );
        complex
    }

    /// Number of simplices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    /// Returns `true` when no simplex has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Number of simplices of `dimension`.
    #[must_use]
    pub fn count(&self, dimension: usize) -> usize {
        self.simplices
            .keys()
            .filter(|simplex| simplex.dimension() == dimension)
            .count()
    }

    /// Highest simplex dimension, or `None` when empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.simplices.keys().map(Simplex::dimension).max()
    }

    /// Filtration value of `simplex`, or `None` when absent.
    #[must_use]
    pub fn filtration_of(&self, simplex: &Simplex) -> Option<f64> {
        self.simplices.get(simplex).copied()
    }

    /// Simplices ordered by filtration value, then dimension, then vertices.
    #[must_use]
    pub fn filtration(&self) -> Vec<(&Simplex, f64)> {
        let mut ordered: Vec<(&Simplex, f64)> = self
            .simplices
            .iter()
            .map(|(simplex, &value)| (simplex, value))
            .collect();
        ordered.sort_by(|(a, a_value), (b, b_value)| {
            a_value
                .total_cmp(b_value)
                .then(a.dimension().cmp(&b.dimension()))
                .then_with(|| a.vertices().cmp(b.vertices()))
        });
        ordered
    }

    /// Alternating sum of simplex counts by dimension.
    #[must_use]
    pub fn euler_characteristic(&self) -> i64 {
        self.simplices
            .keys()
            .map(|simplex| if simplex.dimension() % 2 == 0 { 1 } else { -1 })
            .sum()
    }
}
