//! Seeded RNG for scenario setup.
//!
//! Dispatch itself is deterministic; randomness only enters when a scenario
//! places its ambulances.  Seeding a `SmallRng` from the config makes that
//! placement reproducible run-to-run.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Scenario-level deterministic RNG.
///
/// Single-threaded use only; nothing in the dispatch path shares it.
pub struct ScenarioRng(SmallRng);

impl ScenarioRng {
    pub fn new(seed: u64) -> Self {
        ScenarioRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw `amount` distinct indices from `0..length`, in sampling order.
    ///
    /// # Panics
    /// Panics if `amount > length`; callers check this first.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount).into_vec()
    }
}
