//! Property-based tests for the merge-forest sweep.
//!
//! Generates grids with varied value distributions and checks that the
//! sweep is deterministic, that its trace replays consistently against the
//! returned root set, and that the merge-graph bookkeeping balances.

mod invariants;
mod strategies;
#[cfg(test)]
mod tests;
mod types;
