//! Decision building blocks shared by the concrete strategies.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{ArmyId, GameState, TerritoryId};
use crate::rules::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};

/// Each unit goes to an independently chosen territory.
pub fn random_reinforcement(targets: &[TerritoryId], owed: u32, rng: &mut impl Rng) -> ReinforcementPlan {
    let mut plan = ReinforcementPlan::new();
    if targets.is_empty() {
        return plan;
    }
    for _ in 0..owed {
        if let Some(&t) = targets.choose(rng) {
            plan.add(t, 1);
        }
    }
    plan
}

/// Spreads units evenly; the remainder lands on randomly chosen territories.
pub fn uniform_reinforcement(targets: &[TerritoryId], owed: u32, rng: &mut impl Rng) -> ReinforcementPlan {
    let mut plan = ReinforcementPlan::new();
    if targets.is_empty() {
        return plan;
    }
    let n = targets.len() as u32;
    for &t in targets {
        plan.add(t, owed / n);
    }
    for &t in targets.choose_multiple(rng, (owed % n) as usize) {
        plan.add(t, 1);
    }
    plan
}

/// Territories of `army` touching at least one enemy, or all of them if
/// none does.
pub fn border_territories(state: &GameState, army: ArmyId) -> Vec<TerritoryId> {
    let owned = state.territories_of(army);
    let borders: Vec<TerritoryId> = owned
        .iter()
        .copied()
        .filter(|&t| !state.enemy_neighbours(t).is_empty())
        .collect();
    if borders.is_empty() {
        owned
    } else {
        borders
    }
}

/// Picks uniformly among every legal attack and stopping.
pub fn random_attack(state: &GameState, army: ArmyId, rng: &mut impl Rng) -> Option<AttackDecision> {
    let options = state.attack_options(army);
    let pick = rng.gen_range(0..=options.len());
    let &(from, to, max) = options.get(pick)?;
    Some(AttackDecision {
        from,
        to,
        units: rng.gen_range(1..=max),
    })
}

pub fn random_defense(state: &GameState, territory: TerritoryId, rng: &mut impl Rng) -> DefenseDecision {
    DefenseDecision {
        units: rng.gen_range(1..=state.units(territory).max(1)),
    }
}

pub fn maximum_defense(state: &GameState, territory: TerritoryId) -> DefenseDecision {
    DefenseDecision {
        units: state.units(territory).max(1),
    }
}

pub fn random_invasion(range: RangeInclusive<u32>, rng: &mut impl Rng) -> InvasionDecision {
    let units = if range.is_empty() {
        *range.start()
    } else {
        rng.gen_range(range)
    };
    InvasionDecision { units }
}

/// Splits the source's units as evenly as the range allows.
pub fn uniform_invasion(state: &GameState, conquest: &PendingConquest, range: RangeInclusive<u32>) -> InvasionDecision {
    let half = state.units(conquest.from) / 2;
    InvasionDecision {
        units: half.clamp(*range.start(), (*range.end()).max(*range.start())),
    }
}

/// Picks uniformly among every legal maneuver and doing nothing.
pub fn random_maneuver(state: &GameState, army: ArmyId, rng: &mut impl Rng) -> Option<ManeuverDecision> {
    let options = state.maneuver_options(army);
    let pick = rng.gen_range(0..=options.len());
    let &(from, to, max) = options.get(pick)?;
    Some(ManeuverDecision {
        from,
        to,
        units: rng.gen_range(1..=max),
    })
}

/// Levels out a random pair of friendly neighbours, if they are uneven.
pub fn uniform_maneuver(state: &GameState, army: ArmyId, rng: &mut impl Rng) -> Option<ManeuverDecision> {
    let options = state.maneuver_options(army);
    let &(from, to, _) = options.choose(rng)?;
    let units = state.units(from).saturating_sub(state.units(to)) / 2;
    (units > 0).then_some(ManeuverDecision { from, to, units })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::SmallRng;
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
    fn reinforcements_place_exactly_what_is_owed() {
        let targets = [TerritoryId(0), TerritoryId(1), TerritoryId(2)];
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(random_reinforcement(&targets, 7, &mut rng).total(), 7);
        let plan = uniform_reinforcement(&targets, 7, &mut rng);
        assert_eq!(plan.total(), 7);
        assert!(targets.iter().all(|&t| (2..=3).contains(&plan.get(t))));
    }

    #[test]
    fn borders_are_territories_facing_an_enemy() {
        let s = state([(0, 1), (0, 1), (1, 1), (1, 1)]);
        assert_eq!(border_territories(&s, ArmyId(0)), vec![TerritoryId(1)]);
    }

    #[test]
    fn random_decisions_are_always_legal() {
        let s = state([(0, 5), (0, 4), (1, 3), (1, 1)]);
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..200 {
            if let Some(a) = random_attack(&s, ArmyId(0), &mut rng) {
                assert_eq!((a.from, a.to), (TerritoryId(1), TerritoryId(2)));
                assert!((1..=3).contains(&a.units));
            }
            if let Some(m) = random_maneuver(&s, ArmyId(0), &mut rng) {
                assert!(m.units >= 1 && m.units < s.units(m.from));
            }
            let d = random_defense(&s, TerritoryId(2), &mut rng);
            assert!((1..=3).contains(&d.units));
            assert!((2..=4).contains(&random_invasion(2..=4, &mut rng).units));
        }
    }

    #[test]
    fn uniform_invasion_and_maneuver_level_out() {
        let s = state([(0, 9), (0, 1), (1, 3), (1, 1)]);
        let pending = PendingConquest {
            from: TerritoryId(0),
            to: TerritoryId(1),
            attacker: ArmyId(0),
            defender: ArmyId(1),
            attack_dice: 3,
        };
        assert_eq!(uniform_invasion(&s, &pending, 3..=8).units, 4);
        assert_eq!(uniform_invasion(&s, &pending, 5..=8).units, 5);

        let mut rng = SmallRng::seed_from_u64(1);
        let m = uniform_maneuver(&s, ArmyId(0), &mut rng).unwrap();
        assert_eq!((m.from, m.to, m.units), (TerritoryId(0), TerritoryId(1), 4));
        assert_eq!(maximum_defense(&s, TerritoryId(2)).units, 3);
    }
}
