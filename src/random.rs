//! Seeded random number generation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator used by every search in this crate.
pub type SearchRng = ChaCha8Rng;

/// Creates a generator from an explicit seed, or from fresh entropy.
pub fn create_rng(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    }
}

/// Seed for one zone of a multi-zone run.
///
/// Zones get distinct, reproducible streams regardless of the order (or
/// thread) they are solved on.
pub fn zone_seed(base: Option<u64>, zone: usize) -> Option<u64> {
    base.map(|seed| seed.wrapping_add(zone as u64))
}
