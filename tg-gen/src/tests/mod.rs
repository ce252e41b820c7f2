mod model_test;
mod pipeline_test;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::*;
use tg_core::TimeWindow;

use crate::forest::ForestConfig;

const TEST_SEED: u64 = 0x5eed;

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

#[fixture]
fn window() -> TimeWindow {
    TimeWindow::parse("2025-01-01T00:00:00.000Z", "2025-12-31T23:59:59.000Z").unwrap()
}

#[fixture]
fn config(window: TimeWindow) -> ForestConfig {
    ForestConfig::new(1000, window)
}
