//! Property checks shared by the proptest runners and the seeded rstest
//! cases.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::grid::GridPoint;
use crate::merge_forest::{MergeForest, SweepOutcome, SweepTrace};

use super::types::GridFixture;

fn fail(fixture: &GridFixture, message: &str) -> TestCaseError {
    TestCaseError::fail(format!(
        "{message} (distribution={:?}, seed={}, shape={}x{})",
        fixture.distribution,
        fixture.seed,
        fixture.grid.rows(),
        fixture.grid.cols(),
    ))
}

/// Two builds over the same grid produce identical graphs and roots.
pub(super) fn run_determinism_property(fixture: &GridFixture) -> TestCaseResult {
    let first = MergeForest::build(&fixture.grid);
    let second = MergeForest::build(&fixture.grid);
    if first != second {
        return Err(fail(fixture, "repeated builds diverged"));
    }
    Ok(())
}

/// Replays the sweep trace against a shadow root set.
///
/// - A birth adds exactly one root; joins leave the count unchanged; merges
///   remove exactly one.
/// - A join targets a current root.
/// - A merge joins two representatives that were both roots just before it.
/// - The shadow set matches the returned roots at the end.
pub(super) fn run_trace_replay_property(fixture: &GridFixture) -> TestCaseResult {
    let mut trace = SweepTrace::default();
    let forest = MergeForest::build_with_observer(&fixture.grid, &mut trace);

    let mut shadow: BTreeSet<GridPoint> = BTreeSet::new();
    let mut visited = HashSet::new();
    for step in trace.steps() {
        if !visited.insert(step.point) {
            return Err(fail(fixture, &format!("{} swept twice", step.point)));
        }
        let before = shadow.len();
        match step.outcome {
            SweepOutcome::Birth => {
                shadow.insert(step.point);
                if shadow.len() != before + 1 {
                    return Err(fail(fixture, "birth did not add a root"));
                }
            }
            SweepOutcome::Join { representative } => {
                if !shadow.contains(&representative) {
                    return Err(fail(
                        fixture,
                        &format!("{} joined stale representative {representative}", step.point),
                    ));
                }
            }
            SweepOutcome::Merge { survivor, absorbed } => {
                if !shadow.contains(&survivor) || !shadow.contains(&absorbed) {
                    return Err(fail(
                        fixture,
                        &format!("merge {survivor} <- {absorbed} used a non-root"),
                    ));
                }
                shadow.remove(&absorbed);
            }
        }
        if step.root_count != shadow.len() {
            return Err(fail(
                fixture,
                &format!(
                    "root count {} after step {} but replay holds {}",
                    step.root_count,
                    step.position,
                    shadow.len()
                ),
            ));
        }
    }

    if visited.len() != fixture.grid.len() {
        return Err(fail(fixture, "not every cell was swept"));
    }
    if &shadow != forest.roots() {
        return Err(fail(fixture, "replayed roots differ from the returned roots"));
    }
    Ok(())
}

/// Sweep steps visit values in non-decreasing order with row-major ties.
pub(super) fn run_sweep_order_property(fixture: &GridFixture) -> TestCaseResult {
    let mut trace = SweepTrace::default();
    MergeForest::build_with_observer(&fixture.grid, &mut trace);

    for pair in trace.steps().windows(2) {
        let [previous, next] = pair else {
            continue;
        };
        let ordered = previous.value < next.value
            || (previous.value.total_cmp(&next.value).is_eq() && previous.point < next.point);
        if !ordered {
            return Err(fail(
                fixture,
                &format!("{} swept before {}", previous.point, next.point),
            ));
        }
    }
    Ok(())
}

/// Counters, graph and roots agree with one another.
pub(super) fn run_bookkeeping_property(fixture: &GridFixture) -> TestCaseResult {
    let forest = MergeForest::build(&fixture.grid);
    let stats = forest.stats();
    let graph = forest.graph();

    if stats.points != fixture.grid.len() {
        return Err(fail(fixture, "point counter does not match grid size"));
    }
    if stats.births + stats.joins + stats.merges != stats.points {
        return Err(fail(fixture, "every step must be a birth, join or merge"));
    }
    if stats.births - stats.merges != forest.roots().len() {
        return Err(fail(fixture, "roots must equal births minus merges"));
    }
    if graph.edge_count() != stats.merges {
        return Err(fail(fixture, "one edge per merge event"));
    }
    if graph.node_count() != stats.births {
        return Err(fail(fixture, "every birth must appear as a node"));
    }
    if !forest.roots().is_subset(graph.nodes()) {
        return Err(fail(fixture, "roots must be graph nodes"));
    }

    let mut pairs = HashSet::new();
    for edge in graph.edges() {
        if forest.roots().contains(&edge.absorbed()) {
            return Err(fail(fixture, &format!("absorbed {} is still a root", edge.absorbed())));
        }
        if !pairs.insert(edge.endpoints()) {
            return Err(fail(fixture, "duplicate merge edge"));
        }
    }
    Ok(())
}

/// Roots and ordered `(survivor, absorbed)` merges from a naive sweep.
///
/// Parents live in a plain map and every lookup walks the whole chain, so
/// the result does not depend on rank or path compression.
fn naive_sweep(fixture: &GridFixture) -> (BTreeSet<GridPoint>, Vec<(GridPoint, GridPoint)>) {
    fn resolve(parents: &BTreeMap<GridPoint, GridPoint>, mut point: GridPoint) -> GridPoint {
        while let Some(&parent) = parents.get(&point) {
            if parent == point {
                break;
            }
            point = parent;
        }
        point
    }

    let grid = &fixture.grid;
    let mut order: Vec<(f64, GridPoint)> = grid
        .points()
        .filter_map(|point| grid.value(point).map(|value| (value, point)))
        .collect();
    order.sort_by(|(a_value, a), (b_value, b)| a_value.total_cmp(b_value).then(a.cmp(b)));

    let mut parents: BTreeMap<GridPoint, GridPoint> = BTreeMap::new();
    let mut merges = Vec::new();
    for (_, point) in order {
        let up = point
            .up()
            .filter(|neighbour| parents.contains_key(neighbour))
            .map(|neighbour| resolve(&parents, neighbour));
        let left = point
            .left()
            .filter(|neighbour| parents.contains_key(neighbour))
            .map(|neighbour| resolve(&parents, neighbour));
        let root = match (up, left) {
            (Some(survivor), Some(absorbed)) if survivor != absorbed => {
                parents.insert(absorbed, survivor);
                merges.push((survivor, absorbed));
                survivor
            }
            (Some(root), _) | (None, Some(root)) => root,
            (None, None) => point,
        };
        parents.insert(point, root);
    }

    let roots = parents
        .iter()
        .filter(|&(point, parent)| point == parent)
        .map(|(&point, _)| point)
        .collect();
    (roots, merges)
}

/// Roots and merge edges agree with a naive full-resolution sweep.
pub(super) fn run_reference_property(fixture: &GridFixture) -> TestCaseResult {
    let forest = MergeForest::build(&fixture.grid);
    let (roots, merges) = naive_sweep(fixture);

    if forest.roots() != &roots {
        return Err(fail(fixture, "roots differ from the naive sweep"));
    }
    let edges: Vec<(GridPoint, GridPoint)> = forest
        .graph()
        .edges()
        .iter()
        .map(|edge| (edge.survivor(), edge.absorbed()))
        .collect();
    if edges != merges {
        return Err(fail(
            fixture,
            &format!("merge edges {edges:?} differ from the naive sweep {merges:?}"),
        ));
    }
    Ok(())
}
