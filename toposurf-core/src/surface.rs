//! Benchmark scalar surfaces and their sampling onto a grid.
//!
//! Each [`Surface`] is a pure `(x, y) -> f64` function. Sampling evaluates a
//! surface over a rectangular [`SamplingDomain`] with `Z[row, col] =
//! f(x[col], y[row])`, so rows run along `y` and columns along `x`.

use std::f64::consts::{E, PI, TAU};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::error::SurfaceError;
use crate::grid::{GridPoint, ScalarGrid};

/// Default steepness of the Michalewicz valleys.
pub const DEFAULT_MICHALEWICZ_M: u16 = 10;

/// Benchmark surfaces commonly used to exercise optimisers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Rippled bowl: `cos(0.1 r²) + 0.01 r² + 0.2`.
    Surface1,
    /// Concentric ripples: `sin(r²)`.
    Surface2,
    /// Ackley function; global minimum at the origin.
    Ackley,
    /// Rastrigin function; global minimum at the origin.
    Rastrigin,
    /// Rosenbrock valley; global minimum at `(1, 1)`.
    Rosenbrock,
    /// Himmelblau function; four global minima.
    Himmelblau,
    /// Goldstein-Price function; global minimum at `(0, -1)`.
    GoldsteinPrice,
    /// Michalewicz function with steepness `m`.
    Michalewicz {
        /// Valley steepness; larger values give narrower valleys.
        m: u16,
    },
}

impl Surface {
    /// Every surface with default parameters.
    pub const ALL: [Self; 8] = [
        Self::Surface1,
        Self::Surface2,
        Self::Ackley,
        Self::Rastrigin,
        Self::Rosenbrock,
        Self::Himmelblau,
        Self::GoldsteinPrice,
        Self::Michalewicz {
            m: DEFAULT_MICHALEWICZ_M,
        },
    ];

    /// Evaluates the surface at `(x, y)`.
    ///
    /// # Examples
    /// ```
    /// use toposurf_core::Surface;
    ///
    /// assert!(Surface::Ackley.evaluate(0.0, 0.0).abs() < 1e-12);
    /// assert_eq!(Surface::Rosenbrock.evaluate(1.0, 1.0), 0.0);
    /// ```
    #[must_use]
    pub fn evaluate(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Surface1 => {
                let r2 = x.mul_add(x, y * y);
                (1.2 + (0.1 * r2).cos() + 0.01 * r2) - 1.0
            }
            Self::Surface2 => x.mul_add(x, y * y).sin(),
            Self::Ackley => {
                let radial = -20.0 * (-0.2 * (0.5 * x.mul_add(x, y * y)).sqrt()).exp();
                let periodic = -(0.5 * ((TAU * x).cos() + (TAU * y).cos())).exp();
                radial + periodic + E + 20.0
            }
            Self::Rastrigin => {
                20.0 + x * x + y * y - 10.0 * ((TAU * x).cos() + (TAU * y).cos())
            }
            Self::Rosenbrock => {
                let a = 1.0 - x;
                let b = y - x * x;
                a * a + 100.0 * b * b
            }
            Self::Himmelblau => {
                let a = x * x + y - 11.0;
                let b = x + y * y - 7.0;
                a * a + b * b
            }
            Self::GoldsteinPrice => {
                let s = x + y + 1.0;
                let first = 1.0
                    + s * s
                        * (19.0 - 14.0 * x + 3.0 * x * x - 14.0 * y + 6.0 * x * y + 3.0 * y * y);
                let t = 2.0 * x - 3.0 * y;
                let second = 30.0
                    + t * t
                        * (18.0 - 32.0 * x + 12.0 * x * x + 48.0 * y - 36.0 * x * y
                            + 27.0 * y * y);
                first * second
            }
            Self::Michalewicz { m } => {
                let exponent = 2 * i32::from(m);
                let term_x = -x.sin() * (x * x / PI).sin().powi(exponent);
                let term_y = -y.sin() * (2.0 * y * y / PI).sin().powi(exponent);
                term_x + term_y
            }
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surface1 => "Surface1 Function",
            Self::Surface2 => "Surface2 Function",
            Self::Ackley => "Ackley Function",
            Self::Rastrigin => "Rastrigin Function",
            Self::Rosenbrock => "Rosenbrock Function",
            Self::Himmelblau => "Himmelblau Function",
            Self::GoldsteinPrice => "Goldstein Price Function",
            Self::Michalewicz { .. } => "Michalewicz Function",
        }
    }

    /// Kebab-case identifier accepted by [`FromStr`].
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Surface1 => "surface1",
            Self::Surface2 => "surface2",
            Self::Ackley => "ackley",
            Self::Rastrigin => "rastrigin",
            Self::Rosenbrock => "rosenbrock",
            Self::Himmelblau => "himmelblau",
            Self::GoldsteinPrice => "goldstein-price",
            Self::Michalewicz { .. } => "michalewicz",
        }
    }

    /// Samples the surface over `domain`.
    ///
    /// # Errors
    /// Returns [`SurfaceError`] when an axis is invalid, or
    /// [`SurfaceError::Grid`] when an evaluation is not finite.
    ///
    /// # Examples
    /// ```
    /// use toposurf_core::{AxisRange, SamplingDomain, Surface};
    ///
    /// let domain = SamplingDomain::new(
    ///     AxisRange::new(-1.0, 1.0, 3),
    ///     AxisRange::new(-1.0, 1.0, 5),
    /// );
    /// let sampled = Surface::Rastrigin.sample(&domain)?;
    /// assert_eq!(sampled.grid().rows(), 5);
    /// assert_eq!(sampled.grid().cols(), 3);
    /// # Ok::<(), toposurf_core::SurfaceError>(())
    /// ```
    #[instrument(
        name = "core.surface.sample",
        skip(self, domain),
        fields(surface = self.slug(), cols = domain.x.samples, rows = domain.y.samples),
    )]
    pub fn sample(self, domain: &SamplingDomain) -> Result<SampledSurface, SurfaceError> {
        domain.validate()?;
        let xs = domain.x.coordinates();
        let ys = domain.y.coordinates();
        let values = evaluate_rows(self, &xs, &ys);
        let grid = ScalarGrid::from_vec(ys.len(), xs.len(), values)?;
        debug!(cells = grid.len(), "surface sampled");
        Ok(SampledSurface {
            surface: self,
            xs,
            ys,
            grid,
        })
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Surface {
    type Err = SurfaceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|surface| surface.slug() == normalised)
            .ok_or(SurfaceError::UnknownSurface {
                provided: raw.to_owned(),
            })
    }
}

#[cfg(feature = "parallel")]
fn evaluate_rows(surface: Surface, xs: &[f64], ys: &[f64]) -> Vec<f64> {
    use rayon::prelude::*;

    let mut values = vec![0.0; xs.len() * ys.len()];
    values
        .par_chunks_mut(xs.len())
        .zip(ys.par_iter())
        .for_each(|(row, &y)| {
            for (cell, &x) in row.iter_mut().zip(xs) {
                *cell = surface.evaluate(x, y);
            }
        });
    values
}

#[cfg(not(feature = "parallel"))]
fn evaluate_rows(surface: Surface, xs: &[f64], ys: &[f64]) -> Vec<f64> {
    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| surface.evaluate(x, y)))
        .collect()
}

/// Evenly spaced samples along one axis, endpoints included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Number of samples.
    pub samples: usize,
}

impl AxisRange {
    /// Creates an axis range.
    #[must_use]
    pub const fn new(min: f64, max: f64, samples: usize) -> Self {
        Self { min, max, samples }
    }

    fn validate(&self, axis: &'static str) -> Result<(), SurfaceError> {
        if self.samples == 0 {
            return Err(SurfaceError::ZeroSamples { axis });
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SurfaceError::NonFiniteBounds {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(SurfaceError::InvertedRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Sample coordinates; a single sample sits at `min`.
    ///
    /// # Examples
    /// ```
    /// use toposurf_core::AxisRange;
    ///
    /// assert_eq!(AxisRange::new(0.0, 1.0, 3).coordinates(), vec![0.0, 0.5, 1.0]);
    /// assert_eq!(AxisRange::new(2.0, 4.0, 1).coordinates(), vec![2.0]);
    /// ```
    #[must_use]
    pub fn coordinates(&self) -> Vec<f64> {
        if self.samples <= 1 {
            return vec![self.min; self.samples];
        }
        let last = (self.samples - 1) as f64;
        let span = self.max - self.min;
        (0..self.samples)
            .map(|index| {
                if index + 1 == self.samples {
                    self.max
                } else {
                    self.min + span * (index as f64 / last)
                }
            })
            .collect()
    }
}

/// Largest number of grid cells a [`SamplingDomain`] may produce.
pub const MAX_SURFACE_CELLS: usize = 1 << 24;

/// Rectangular region to sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingDomain {
    /// Column axis.
    pub x: AxisRange,
    /// Row axis.
    pub y: AxisRange,
}

impl SamplingDomain {
    /// Creates a domain from its two axes.
    #[must_use]
    pub const fn new(x: AxisRange, y: AxisRange) -> Self {
        Self { x, y }
    }

    /// Square domain `[min, max]²` with `samples` points per axis.
    #[must_use]
    pub const fn square(min: f64, max: f64, samples: usize) -> Self {
        Self::new(
            AxisRange::new(min, max, samples),
            AxisRange::new(min, max, samples),
        )
    }

    /// Checks both axes and the total cell count.
    ///
    /// # Errors
    /// Returns [`SurfaceError::ZeroSamples`], [`SurfaceError::NonFiniteBounds`]
    /// or [`SurfaceError::InvertedRange`] for the first invalid axis, and
    /// [`SurfaceError::TooManySamples`] when the grid would exceed
    /// [`MAX_SURFACE_CELLS`].
    pub fn validate(&self) -> Result<(), SurfaceError> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        match self.x.samples.checked_mul(self.y.samples) {
            Some(cells) if cells <= MAX_SURFACE_CELLS => Ok(()),
            _ => Err(SurfaceError::TooManySamples {
                x_samples: self.x.samples,
                y_samples: self.y.samples,
                limit: MAX_SURFACE_CELLS,
            }),
        }
    }
}

/// World coordinates of one grid sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    /// Column-axis coordinate.
    pub x: f64,
    /// Row-axis coordinate.
    pub y: f64,
    /// Surface value.
    pub z: f64,
}

/// A surface evaluated over a domain.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledSurface {
    surface: Surface,
    xs: Vec<f64>,
    ys: Vec<f64>,
    grid: ScalarGrid,
}

impl SampledSurface {
    /// The evaluated surface.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        self.surface
    }

    /// Column-axis coordinates.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Row-axis coordinates.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// The sampled values.
    #[must_use]
    pub const fn grid(&self) -> &ScalarGrid {
        &self.grid
    }

    /// World coordinates of `point`, or `None` outside the grid.
    #[must_use]
    pub fn world_point(&self, point: GridPoint) -> Option<SurfacePoint> {
        Some(SurfacePoint {
            x: *self.xs.get(point.col())?,
            y: *self.ys.get(point.row())?,
            z: self.grid.value(point)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    #[rstest]
    #[case(Surface::Ackley, 0.0, 0.0, 0.0)]
    #[case(Surface::Rastrigin, 0.0, 0.0, 0.0)]
    #[case(Surface::Rosenbrock, 1.0, 1.0, 0.0)]
    #[case(Surface::Himmelblau, 3.0, 2.0, 0.0)]
    #[case(Surface::GoldsteinPrice, 0.0, -1.0, 3.0)]
    #[case(Surface::Surface1, 0.0, 0.0, 1.2)]
    #[case(Surface::Surface2, 0.0, 0.0, 0.0)]
    #[case(Surface::Michalewicz { m: DEFAULT_MICHALEWICZ_M }, 0.0, 0.0, 0.0)]
    fn known_values(#[case] surface: Surface, #[case] x: f64, #[case] y: f64, #[case] expected: f64) {
        let value = surface.evaluate(x, y);
        assert!(
            (value - expected).abs() < TOLERANCE,
            "{surface} at ({x}, {y}) = {value}, expected {expected}"
        );
    }

    #[rstest]
    fn rastrigin_matches_hand_computed_value() {
        // x = 0.5, y = 0: 20 + 0.25 - 10 * (cos(pi) + cos(0)) = 20.25
        let value = Surface::Rastrigin.evaluate(0.5, 0.0);
        assert!((value - 20.25).abs() < TOLERANCE);
    }

    #[rstest]
    fn michalewicz_has_a_deep_valley_near_the_known_minimum() {
        let value = Surface::Michalewicz { m: 10 }.evaluate(2.20, 1.57);
        assert!(value < -1.79, "value {value} should approach -1.8013");
    }

    #[rstest]
    fn slugs_round_trip_through_from_str() {
        for surface in Surface::ALL {
            let parsed: Surface = surface.slug().parse().expect("slug must parse");
            assert_eq!(parsed, surface);
        }
    }

    #[rstest]
    #[case("GOLDSTEIN_PRICE", Surface::GoldsteinPrice)]
    #[case(" ackley ", Surface::Ackley)]
    fn from_str_normalises_input(#[case] raw: &str, #[case] expected: Surface) {
        assert_eq!(raw.parse::<Surface>().expect("must parse"), expected);
    }

    #[rstest]
    fn from_str_rejects_unknown_names() {
        let err = "sphere".parse::<Surface>().expect_err("unknown surface");
        assert_eq!(
            err,
            SurfaceError::UnknownSurface {
                provided: "sphere".to_owned()
            }
        );
    }

    #[rstest]
    #[case(AxisRange::new(0.0, 1.0, 0), "x", SurfaceError::ZeroSamples { axis: "x" })]
    #[case(
        AxisRange::new(1.0, 0.0, 3),
        "x",
        SurfaceError::InvertedRange { axis: "x", min: 1.0, max: 0.0 }
    )]
    fn invalid_axes_are_rejected(
        #[case] axis: AxisRange,
        #[case] label: &'static str,
        #[case] expected: SurfaceError,
    ) {
        assert_eq!(axis.validate(label), Err(expected));
    }

    #[rstest]
    fn non_finite_bounds_are_rejected() {
        let domain = SamplingDomain::new(
            AxisRange::new(0.0, 1.0, 2),
            AxisRange::new(f64::NEG_INFINITY, 1.0, 2),
        );
        let err = Surface::Ackley.sample(&domain).expect_err("must fail");
        assert!(matches!(err, SurfaceError::NonFiniteBounds { axis: "y", .. }));
    }

    #[rstest]
    #[case(usize::MAX, 2)]
    #[case(2, usize::MAX)]
    #[case(4097, 4096)]
    fn oversized_domains_are_rejected_before_allocating(
        #[case] x_samples: usize,
        #[case] y_samples: usize,
    ) {
        let domain = SamplingDomain::new(
            AxisRange::new(0.0, 1.0, x_samples),
            AxisRange::new(0.0, 1.0, y_samples),
        );
        let err = Surface::Ackley.sample(&domain).expect_err("must fail");
        assert_eq!(
            err,
            SurfaceError::TooManySamples {
                x_samples,
                y_samples,
                limit: MAX_SURFACE_CELLS,
            }
        );
    }

    #[rstest]
    fn domains_at_the_cell_limit_validate() {
        assert_eq!(SamplingDomain::square(0.0, 1.0, 4096).validate(), Ok(()));
    }

    #[rstest]
    fn coordinates_include_both_endpoints() {
        let coords = AxisRange::new(-5.0, 5.0, 11).coordinates();
        assert_eq!(coords.len(), 11);
        assert_eq!(coords.first().copied(), Some(-5.0));
        assert_eq!(coords.last().copied(), Some(5.0));
        assert!((coords[5]).abs() < TOLERANCE);
    }

    #[rstest]
    fn sampling_uses_meshgrid_xy_layout() {
        let domain = SamplingDomain::new(AxisRange::new(0.0, 2.0, 3), AxisRange::new(0.0, 1.0, 2));
        let sampled = Surface::Rosenbrock.sample(&domain).expect("sampling must succeed");
        let grid = sampled.grid();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        for point in grid.points() {
            let world = sampled.world_point(point).expect("point is inside the grid");
            assert_eq!(world.x, sampled.xs()[point.col()]);
            assert_eq!(world.y, sampled.ys()[point.row()]);
            assert_eq!(world.z, Surface::Rosenbrock.evaluate(world.x, world.y));
        }
        assert_eq!(sampled.world_point(GridPoint::new(2, 0)), None);
    }

    #[rstest]
    fn overflowing_evaluations_surface_as_grid_errors() {
        let domain = SamplingDomain::square(1e200, 1e200, 1);
        let err = Surface::GoldsteinPrice.sample(&domain).expect_err("overflow must fail");
        assert_eq!(
            err.grid_code(),
            Some(crate::error::GridErrorCode::NonFinite)
        );
    }
}
