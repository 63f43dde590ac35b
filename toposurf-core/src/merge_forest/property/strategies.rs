//! Grid generators for merge-forest property tests.
//!
//! Every generator is driven by a seeded `SmallRng` so failing cases can be
//! reproduced from the `(distribution, seed)` pair alone.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::grid::ScalarGrid;

use super::types::{GridFixture, ValueDistribution};

const MAX_SIDE: usize = 24;

pub(super) fn distribution_strategy() -> impl Strategy<Value = ValueDistribution> {
    prop_oneof![
        1 => Just(ValueDistribution::Continuous),
        2 => Just(ValueDistribution::Plateaus),
        1 => Just(ValueDistribution::Flat),
        1 => Just(ValueDistribution::Wells),
    ]
}

pub(super) fn grid_fixture_strategy() -> impl Strategy<Value = GridFixture> {
    (distribution_strategy(), any::<u64>())
        .prop_map(|(distribution, seed)| generate_fixture(distribution, seed))
}

pub(super) fn generate_fixture(distribution: ValueDistribution, seed: u64) -> GridFixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let rows = rng.gen_range(1..=MAX_SIDE);
    let cols = rng.gen_range(1..=MAX_SIDE);
    let cells = rows * cols;

    let values: Vec<f64> = match distribution {
        ValueDistribution::Continuous => (0..cells).map(|_| rng.gen_range(-100.0..100.0)).collect(),
        ValueDistribution::Plateaus => {
            let levels = rng.gen_range(1..=4_u32);
            (0..cells)
                .map(|_| f64::from(rng.gen_range(0..levels)))
                .collect()
        }
        ValueDistribution::Flat => vec![1.0; cells],
        ValueDistribution::Wells => (0..cells)
            .map(|_| {
                if rng.gen_bool(0.2) {
                    rng.gen_range(0.0..1.0)
                } else {
                    rng.gen_range(10.0..11.0)
                }
            })
            .collect(),
    };

    let grid = match ScalarGrid::from_vec(rows, cols, values) {
        Ok(grid) => grid,
        Err(err) => panic!("generated grid must be valid: {err}"),
    };
    GridFixture {
        grid,
        distribution,
        seed,
    }
}
