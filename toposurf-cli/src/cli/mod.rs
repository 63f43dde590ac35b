//! Command-line interface orchestration for toposurf.
//!
//! `merge` builds the merge forest of a grid and `complex` builds its
//! filtered simplicial complex. Both accept a grid sampled from a built-in
//! surface or read from a text file. `surfaces` lists the built-in surfaces.

mod commands;
mod grid_file;
mod render;

pub use commands::{
    Cli, CliError, Command, ComplexCommand, ComplexSummary, ExecutionSummary, FileArgs,
    GridSource, HighlightRecord, HighlightSet, LoadedGrid, MergeCommand, MergeSummary,
    OutputFormat, SummaryKind, SurfaceArgs, TriangulationArg, run_cli,
};
pub use grid_file::{GridFileError, read_grid};
pub use render::render_summary;

#[cfg(test)]
mod test_helpers;
