use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Build an RNG from a seed. A seed of `0` draws entropy from the OS; any
/// other value gives a deterministic, reproducible sequence.
pub fn create_rng(seed: u64) -> SmallRng {
    if seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(seed)
    }
}
