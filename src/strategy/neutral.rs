//! Players that never attack.
//!
//! A neutral army only reinforces, defends and shuffles units around. It can
//! never win, but a well-defended neutral can hold out against attackers.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;

use super::moves;
use super::Strategy;
use crate::board::{ArmyId, GameState, TerritoryId};
use crate::rules::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeutralStrategy {
    uniform: bool,
}

impl NeutralStrategy {
    /// Random reinforcement, defence and maneuvers.
    pub fn fully_random() -> Self {
        NeutralStrategy { uniform: false }
    }

    /// Even reinforcement, maximal defence, levelling maneuvers.
    pub fn uniform() -> Self {
        NeutralStrategy { uniform: true }
    }
}

impl Strategy for NeutralStrategy {
    fn name(&self) -> &str {
        if self.uniform {
            "neutral-uniform"
        } else {
            "neutral"
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

    fn attack(&self, _state: &GameState, _army: ArmyId, _rng: &mut SmallRng) -> Option<AttackDecision> {
        None
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

    /// Unreachable in play since a neutral never attacks; answers the
    /// smallest legal count.
    fn invade(
        &self,
        _state: &GameState,
        _conquest: &PendingConquest,
        range: RangeInclusive<u32>,
        _rng: &mut SmallRng,
    ) -> InvasionDecision {
        InvasionDecision { units: *range.start() }
    }

    fn maneuver(&self, state: &GameState, army: ArmyId, rng: &mut SmallRng) -> Option<ManeuverDecision> {
        if self.uniform {
            moves::uniform_maneuver(state, army, rng)
        } else {
            moves::random_maneuver(state, army, rng)
        }
    }
}
