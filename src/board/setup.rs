//! Initial placement.
//!
//! Territories are shuffled and dealt to the armies in a shuffled seat
//! order, so every army holds the same number of territories give or take
//! one. Each territory starts with two units.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::state::GameState;
use super::world::{ArmyId, TerritoryId, World};
use crate::error::ConfigError;

/// Units placed on every territory at setup.
pub const INITIAL_UNITS: u32 = 2;

/// Generator for dealing a board from a game seed. Independent of the
/// streams the game itself derives from the same seed.
pub fn setup_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(!seed)
}

/// Deals every territory at random, evenly among the armies.
pub fn random_initial_state(world: Arc<World>, rng: &mut impl Rng) -> Result<GameState, ConfigError> {
    let mut armies: Vec<ArmyId> = world.army_ids().collect();
    armies.shuffle(rng);
    let mut territories: Vec<TerritoryId> = world.territory_ids().collect();
    territories.shuffle(rng);

    let assignments: Vec<(TerritoryId, ArmyId, u32)> = territories
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, armies[i % armies.len()], INITIAL_UNITS))
        .collect();
    GameState::from_assignments(world, &assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn deal_is_even_and_complete() {
        let world = Arc::new(World::from_spec(&maps::classic(), 5).unwrap());
        let mut rng = SmallRng::seed_from_u64(7);
        let state = random_initial_state(world.clone(), &mut rng).unwrap();

        let counts: Vec<usize> = world.army_ids().map(|a| state.territory_count_of(a)).collect();
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        assert!(max - min <= 1, "uneven deal: {counts:?}");
        assert_eq!(counts.iter().sum::<usize>(), 42);
        assert!(state.occupation().iter().all(|o| o.units == INITIAL_UNITS));
    }

    #[test]
    fn same_seed_same_deal() {
        let world = Arc::new(World::from_spec(&maps::polytech(), 3).unwrap());
        let a = random_initial_state(world.clone(), &mut SmallRng::seed_from_u64(11)).unwrap();
        let b = random_initial_state(world, &mut SmallRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }
}
