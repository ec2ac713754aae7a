//! Players that attack at random.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;

use super::moves;
use super::Strategy;
use crate::board::{ArmyId, GameState, TerritoryId};
use crate::rules::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};

/// Attacks, invades and maneuvers at random.
///
/// The uniform variant spreads its reinforcements evenly, always defends
/// with everything, and splits units evenly when invading or maneuvering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomStrategy {
    uniform: bool,
}

impl RandomStrategy {
    pub fn fully_random() -> Self {
        RandomStrategy { uniform: false }
    }

    pub fn uniform() -> Self {
        RandomStrategy { uniform: true }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        if self.uniform {
            "uniform"
        } else {
            "random"
        }
    }

    fn reinforce(&self, state: &GameState, army: ArmyId, owed: u32, rng: &mut SmallRng) -> ReinforcementPlan {
        let owned = state.territories_of(army);
        if self.uniform {
            moves::uniform_reinforcement(&owned, owed, rng)
        } else {
            moves::random_reinforcement(&owned, owed, rng)
        }
    }

    fn attack(&self, state: &GameState, army: ArmyId, rng: &mut SmallRng) -> Option<AttackDecision> {
        moves::random_attack(state, army, rng)
    }

    fn defend(
        &self,
        state: &GameState,
        territory: TerritoryId,
        _attacker: ArmyId,
        _committed: u32,
        rng: &mut SmallRng,
    ) -> DefenseDecision {
        if self.uniform {
            moves::maximum_defense(state, territory)
        } else {
            moves::random_defense(state, territory, rng)
        }
    }

    fn invade(
        &self,
        state: &GameState,
        conquest: &PendingConquest,
        range: RangeInclusive<u32>,
        rng: &mut SmallRng,
    ) -> InvasionDecision {
        if self.uniform {
            moves::uniform_invasion(state, conquest, range)
        } else {
            moves::random_invasion(range, rng)
        }
    }

    fn maneuver(&self, state: &GameState, army: ArmyId, rng: &mut SmallRng) -> Option<ManeuverDecision> {
        if self.uniform {
            moves::uniform_maneuver(state, army, rng)
        } else {
            moves::random_maneuver(state, army, rng)
        }
    }
}
