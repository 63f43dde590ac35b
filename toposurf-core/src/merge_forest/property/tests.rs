//! Property runners for the merge-forest sweep, plus seeded rstest cases
//! covering every value distribution.

use proptest::prelude::*;

use crate::test_utils::suite_proptest_config;

use super::invariants::{
    run_bookkeeping_property, run_determinism_property, run_reference_property,
    run_sweep_order_property, run_trace_replay_property,
};
use super::strategies::{generate_fixture, grid_fixture_strategy};
use super::types::ValueDistribution;

macro_rules! seeded_property_test {
    ($test_name:ident, $runner:path, $expectation:expr) => {
        #[rstest::rstest]
        #[case::continuous_42(ValueDistribution::Continuous, 42)]
        #[case::continuous_999(ValueDistribution::Continuous, 999)]
        #[case::plateaus_42(ValueDistribution::Plateaus, 42)]
        #[case::plateaus_7777(ValueDistribution::Plateaus, 7777)]
        #[case::flat_42(ValueDistribution::Flat, 42)]
        #[case::wells_42(ValueDistribution::Wells, 42)]
        #[case::wells_999(ValueDistribution::Wells, 999)]
        fn $test_name(#[case] distribution: ValueDistribution, #[case] seed: u64) {
            let fixture = generate_fixture(distribution, seed);
            $runner(&fixture).expect($expectation);
        }
    };
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn merge_forest_is_deterministic(fixture in grid_fixture_strategy()) {
        run_determinism_property(&fixture)?;
    }

    #[test]
    fn merge_forest_trace_replays(fixture in grid_fixture_strategy()) {
        run_trace_replay_property(&fixture)?;
    }

    #[test]
    fn merge_forest_sweeps_in_order(fixture in grid_fixture_strategy()) {
        run_sweep_order_property(&fixture)?;
    }

    #[test]
    fn merge_forest_bookkeeping_balances(fixture in grid_fixture_strategy()) {
        run_bookkeeping_property(&fixture)?;
    }

    #[test]
    fn merge_forest_matches_naive_sweep(fixture in grid_fixture_strategy()) {
        run_reference_property(&fixture)?;
    }
}

seeded_property_test!(
    determinism_rstest,
    run_determinism_property,
    "repeated builds must agree"
);

seeded_property_test!(
    trace_replay_rstest,
    run_trace_replay_property,
    "trace replay must hold"
);

seeded_property_test!(
    sweep_order_rstest,
    run_sweep_order_property,
    "sweep order must hold"
);

seeded_property_test!(
    naive_sweep_rstest,
    run_reference_property,
    "naive sweep must agree"
);

seeded_property_test!(
    bookkeeping_rstest,
    run_bookkeeping_property,
    "bookkeeping must balance"
);

#[test]
fn flat_fixture_collapses_to_one_root() {
    let fixture = generate_fixture(ValueDistribution::Flat, 3);
    let forest = crate::MergeForest::build(&fixture.grid);
    assert_eq!(forest.roots().len(), 1);
    assert_eq!(forest.stats().union_events(), fixture.grid.len() - 1);
}
