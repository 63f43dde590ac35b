//! Toposurf core library.
//!
//! Samples benchmark surfaces onto scalar grids and summarises their
//! sub-level set topology as a merge forest or a filtered simplicial complex.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod complex;
mod error;
mod grid;
mod merge_forest;
mod scene;
mod surface;

#[cfg(test)]
mod test_utils;

pub use crate::{
    complex::{FilteredComplex, MAX_SIMPLEX_VERTICES, Simplex, Triangulation},
    error::{
        GridError, GridErrorCode, HighlightError, HighlightErrorCode, SurfaceError,
        SurfaceErrorCode,
    },
    grid::{GridPoint, ScalarGrid},
    merge_forest::{
        MergeEdge, MergeForest, MergeGraph, SweepObserver, SweepOutcome, SweepStats, SweepStep,
        SweepTrace,
    },
    scene::{HighlightedPoint, Scene},
    surface::{
        AxisRange, DEFAULT_MICHALEWICZ_M, MAX_SURFACE_CELLS, SampledSurface, SamplingDomain,
        Surface, SurfacePoint,
    },
};
