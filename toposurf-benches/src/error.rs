//! Benchmark setup error type.

use toposurf_core::SurfaceError;

use crate::source::SyntheticGridError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic grid generation failed.
    #[error("synthetic grid generation failed: {0}")]
    Synthetic(#[from] SyntheticGridError),
    /// Surface sampling failed.
    #[error("surface sampling failed: {0}")]
    Surface(#[from] SurfaceError),
}
