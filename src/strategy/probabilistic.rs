//! A player that only fights battles it expects to win.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;

use super::moves;
use super::Strategy;
use crate::board::{ArmyId, GameState, TerritoryId};
use crate::combat::battle_odds;
use crate::rules::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};

/// Win probability below which no attack is launched.
pub const DEFAULT_THRESHOLD: f64 = 0.65;

/// Reinforces its borders, then attacks with everything it can from the
/// front where the exact battle odds are best, as long as they beat the
/// threshold. Always defends with the maximum and never maneuvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilisticStrategy {
    pub threshold: f64,
}

impl Default for ProbabilisticStrategy {
    fn default() -> Self {
        ProbabilisticStrategy {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ProbabilisticStrategy {
    /// Best `(odds, decision)` over every legal attack.
    pub fn best_attack(&self, state: &GameState, army: ArmyId) -> Option<(f64, AttackDecision)> {
        state
            .attack_options(army)
            .into_iter()
            .map(|(from, to, max)| (battle_odds(max, state.units(to)), AttackDecision { from, to, units: max }))
            .max_by(|(p, _), (q, _)| p.total_cmp(q))
    }
}

impl Strategy for ProbabilisticStrategy {
    fn name(&self) -> &str {
        "probabilistic"
    }

    fn reinforce(&self, state: &GameState, army: ArmyId, owed: u32, rng: &mut SmallRng) -> ReinforcementPlan {
        moves::uniform_reinforcement(&moves::border_territories(state, army), owed, rng)
    }

    fn attack(&self, state: &GameState, army: ArmyId, _rng: &mut SmallRng) -> Option<AttackDecision> {
        self.best_attack(state, army)
            .filter(|&(odds, _)| odds >= self.threshold)
            .map(|(_, decision)| decision)
    }

    fn defend(
        &self,
        state: &GameState,
        territory: TerritoryId,
        _attacker: ArmyId,
        _committed: u32,
        _rng: &mut SmallRng,
    ) -> DefenseDecision {
        moves::maximum_defense(state, territory)
    }

    fn invade(
        &self,
        state: &GameState,
        conquest: &PendingConquest,
        range: RangeInclusive<u32>,
        _rng: &mut SmallRng,
    ) -> InvasionDecision {
        moves::uniform_invasion(state, conquest, range)
    }

    fn maneuver(&self, _state: &GameState, _army: ArmyId, _rng: &mut SmallRng) -> Option<ManeuverDecision> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;

    use super::*;
    use crate::board::{maps, World};

    fn state(owners: [(u8, u32); 4]) -> GameState {
        let spec = maps::from_tables(
            "line",
            &[("west", Some(2), &["a", "b"]), ("east", Some(5), &["c", "d"])],
            &[("a", &["b"]), ("b", &["a", "c"]), ("c", &["b", "d"]), ("d", &["c"])],
        );
        let world = Arc::new(World::from_spec(&spec, 2).unwrap());
        let assignments: Vec<_> = owners
            .iter()
            .enumerate()
            .map(|(i, &(a, u))| (TerritoryId(i as u16), ArmyId(a), u))
            .collect();
        GameState::from_assignments(world, &assignments).unwrap()
    }

    #[test]
    fn attacks_only_with_favourable_odds() {
        let mut rng = SmallRng::seed_from_u64(0);
        let p = ProbabilisticStrategy::default();

        let strong = state([(0, 1), (0, 11), (1, 2), (1, 1)]);
        let attack = p.attack(&strong, ArmyId(0), &mut rng).unwrap();
        assert_eq!((attack.from, attack.to, attack.units), (TerritoryId(1), TerritoryId(2), 10));

        let weak = state([(0, 1), (0, 2), (1, 6), (1, 1)]);
        assert_eq!(p.attack(&weak, ArmyId(0), &mut rng), None);
        assert!(p.best_attack(&weak, ArmyId(0)).is_some());
    }

    #[test]
    fn reinforces_the_front_only() {
        let mut rng = SmallRng::seed_from_u64(0);
        let s = state([(0, 1), (0, 1), (1, 1), (1, 1)]);
        let plan = ProbabilisticStrategy::default().reinforce(&s, ArmyId(0), 5, &mut rng);
        assert_eq!(plan.get(TerritoryId(1)), 5);
        assert_eq!(plan.get(TerritoryId(0)), 0);
    }
}
