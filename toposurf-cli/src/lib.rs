//! Support library for the `toposurf` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and unit tests
//! can drive commands without spawning a subprocess.

pub mod cli;
pub mod logging;
