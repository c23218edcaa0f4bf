//! Input generation: a shuffled permutation of `1..=n`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// `1..=n` in a random order determined by `seed`.
#[must_use]
pub fn shuffled_permutation(n: u32, seed: u64) -> Vec<u32> {
    let mut values: Vec<u32> = (1..=n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    values.shuffle(&mut rng);
    values
}

/// A fresh seed for runs that did not ask for one.
#[must_use]
pub fn random_seed() -> u64 {
    rand::random()
}
