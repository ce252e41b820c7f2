mod ids_test;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::*;

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(1234)
}
