//! Benchmark support crate for toposurf.
//!
//! Provides seeded synthetic grids and parameter labels for the Criterion
//! benchmarks covering surface sampling, the merge-forest sweep and complex
//! construction.

pub mod error;
pub mod params;
pub mod source;
