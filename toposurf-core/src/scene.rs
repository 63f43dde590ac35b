//! Renderer-agnostic pairing of a sampled surface with highlighted points.

use crate::error::HighlightError;
use crate::grid::GridPoint;
use crate::surface::{SampledSurface, SurfacePoint};

/// A highlighted grid cell and its world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightedPoint {
    /// Grid coordinate.
    pub grid: GridPoint,
    /// Sampled world coordinate.
    pub world: SurfacePoint,
}

/// Surface samples plus the points a renderer should mark on them.
///
/// # Examples
/// ```
/// use toposurf_core::{GridPoint, SamplingDomain, Scene, Surface};
///
/// let sampled = Surface::Himmelblau.sample(&SamplingDomain::square(-5.0, 5.0, 11))?;
/// let scene = Scene::new(&sampled, &[GridPoint::new(7, 8)])?;
/// let marked = scene.highlights()[0].world;
/// assert!((marked.x - 3.0).abs() < 1e-12 && (marked.y - 2.0).abs() < 1e-12);
/// assert!(marked.z.abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<'s> {
    surface: &'s SampledSurface,
    highlights: Vec<HighlightedPoint>,
}

impl<'s> Scene<'s> {
    /// Resolves `highlights` against `surface`.
    ///
    /// # Errors
    /// Returns [`HighlightError::OutOfRange`] for the first highlight outside
    /// the sampled grid.
    pub fn new(
        surface: &'s SampledSurface,
        highlights: &[GridPoint],
    ) -> Result<Self, HighlightError> {
        let highlights = highlights
            .iter()
            .map(|&point| {
                surface
                    .world_point(point)
                    .map(|world| HighlightedPoint { grid: point, world })
                    .ok_or(HighlightError::OutOfRange {
                        row: point.row(),
                        col: point.col(),
                        rows: surface.grid().rows(),
                        cols: surface.grid().cols(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            surface,
            highlights,
        })
    }

    /// The sampled surface.
    #[must_use]
    pub const fn surface(&self) -> &SampledSurface {
        self.surface
    }

    /// Highlights in the order they were given.
    #[must_use]
    pub fn highlights(&self) -> &[HighlightedPoint] {
        &self.highlights
    }

    /// Every sample as a world point, row-major.
    pub fn samples(&self) -> impl Iterator<Item = SurfacePoint> + '_ {
        self.surface
            .grid()
            .points()
            .filter_map(|point| self.surface.world_point(point))
    }
}
