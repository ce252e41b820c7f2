use std::collections::HashSet;

use super::*;
use crate::ids::random_id;

#[rstest]
fn test_random_id_canonical_form(mut rng: StdRng) {
    let id = random_id(&mut rng).to_string();

    assert_eq!(id.len(), 36);
    let groups: Vec<_> = id.split('-').map(str::len).collect();
    assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    assert!(id.chars().all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert_eq!(&id[14..15], "4");
}

#[rstest]
fn test_random_id_unique(mut rng: StdRng) {
    let ids: HashSet<_> = (0..10_000).map(|_| random_id(&mut rng)).collect();
    assert_eq!(ids.len(), 10_000);
}

#[rstest]
fn test_random_id_deterministic() {
    let mut a = StdRng::seed_from_u64(7);
    let mut b = StdRng::seed_from_u64(7);
    assert_eq!(random_id(&mut a), random_id(&mut b));
}
