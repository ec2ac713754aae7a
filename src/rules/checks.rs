//! Legality and invariant checks shared by every boundary a decision crosses.
//!
//! The orchestrator runs the `check_*` functions on each decision as soon as
//! a strategy returns it. The transitions run them again on entry, and
//! verify their postconditions on exit, when the run is in
//! `CheckMode::Checked`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::decision::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};
use crate::board::{ArmyId, GameState, TerritoryId};
use crate::error::{GameError, IllegalDecision};

/// Whether transitions repeat their pre- and postcondition checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    #[default]
    Checked,
    /// Decisions are validated once, at the strategy boundary only.
    Trusted,
}

impl CheckMode {
    pub fn enabled(self) -> bool {
        self == CheckMode::Checked
    }
}

pub fn check_army_active(state: &GameState, army: ArmyId) -> Result<(), IllegalDecision> {
    if state.is_defeated(army) {
        return Err(IllegalDecision::EliminatedArmy(army));
    }
    Ok(())
}

fn check_owned(state: &GameState, territory: TerritoryId, army: ArmyId) -> Result<(), IllegalDecision> {
    if !state.is_owned_by(territory, army) {
        return Err(IllegalDecision::NotOwned { territory, army });
    }
    Ok(())
}

fn check_adjacent(state: &GameState, a: TerritoryId, b: TerritoryId) -> Result<(), IllegalDecision> {
    if !state.world().is_adjacent(a, b) {
        return Err(IllegalDecision::NotAdjacent(a, b));
    }
    Ok(())
}

/// No territory may be awaiting an invasion.
pub fn check_no_pending(state: &GameState) -> Result<(), IllegalDecision> {
    match state.vacated().first() {
        Some(&t) => Err(IllegalDecision::ConquestPending(t)),
        None => Ok(()),
    }
}

/// Validates a plan and returns the number of units it places.
pub fn check_reinforcement(
    state: &GameState,
    army: ArmyId,
    plan: &ReinforcementPlan,
) -> Result<u32, IllegalDecision> {
    check_army_active(state, army)?;
    for (territory, _) in plan.iter() {
        check_owned(state, territory, army)?;
    }
    let owed = state.reinforcement_owed(army);
    let placed = plan.total();
    if placed != u64::from(owed) {
        return Err(IllegalDecision::WrongReinforcementTotal { placed, owed });
    }
    Ok(owed)
}

pub fn check_attack(state: &GameState, army: ArmyId, decision: &AttackDecision) -> Result<(), IllegalDecision> {
    let AttackDecision { from, to, units } = *decision;
    check_army_active(state, army)?;
    check_owned(state, from, army)?;
    check_adjacent(state, from, to)?;
    if state.is_owned_by(to, army) {
        return Err(IllegalDecision::SameArmy(from, to));
    }
    if state.units(to) == 0 {
        return Err(IllegalDecision::ConquestPending(to));
    }
    if units == 0 {
        return Err(IllegalDecision::EmptyAttack);
    }
    let max = state.units(from).saturating_sub(1);
    if units > max {
        return Err(IllegalDecision::AttackTooLarge {
            territory: from,
            committed: units,
            max,
        });
    }
    Ok(())
}

pub fn check_defense(
    state: &GameState,
    territory: TerritoryId,
    decision: &DefenseDecision,
) -> Result<(), IllegalDecision> {
    let available = state.units(territory);
    if decision.units == 0 || decision.units > available {
        return Err(IllegalDecision::DefenseOutOfRange {
            territory,
            chosen: decision.units,
            available,
        });
    }
    Ok(())
}

/// Checks that `pending` still describes the state: target emptied but
/// still held by the defender, source held by the attacker.
pub fn check_pending(state: &GameState, pending: &PendingConquest) -> Result<(), IllegalDecision> {
    if state.units(pending.to) != 0 || !state.is_owned_by(pending.to, pending.defender) {
        return Err(IllegalDecision::NoPendingConquest(pending.to));
    }
    check_owned(state, pending.from, pending.attacker)?;
    check_adjacent(state, pending.from, pending.to)
}

/// Legal unit counts for an invasion: at least the dice just rolled, at most
/// everything but one unit of the source.
pub fn invasion_range(state: &GameState, pending: &PendingConquest) -> RangeInclusive<u32> {
    pending.attack_dice..=state.units(pending.from).saturating_sub(1)
}

pub fn check_invasion(
    state: &GameState,
    pending: &PendingConquest,
    decision: &InvasionDecision,
) -> Result<(), IllegalDecision> {
    check_pending(state, pending)?;
    let range = invasion_range(state, pending);
    if !range.contains(&decision.units) {
        return Err(IllegalDecision::InvasionOutOfRange {
            territory: pending.to,
            chosen: decision.units,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

pub fn check_maneuver(
    state: &GameState,
    army: ArmyId,
    decision: &ManeuverDecision,
) -> Result<(), IllegalDecision> {
    let ManeuverDecision { from, to, units } = *decision;
    check_army_active(state, army)?;
    check_owned(state, from, army)?;
    check_owned(state, to, army)?;
    check_adjacent(state, from, to)?;
    if units == 0 {
        return Err(IllegalDecision::EmptyManeuver);
    }
    let max = state.units(from).saturating_sub(1);
    if units > max {
        return Err(IllegalDecision::ManeuverTooLarge {
            territory: from,
            moved: units,
            max,
        });
    }
    Ok(())
}

/// Fails with a postcondition error when `holds` is false.
pub fn ensure(operation: &'static str, holds: bool, detail: impl FnOnce() -> String) -> Result<(), GameError> {
    if holds {
        Ok(())
    } else {
        Err(GameError::Postcondition {
            operation,
            detail: detail(),
        })
    }
}

/// Every territory holds at least one unit, except `vacated` if given.
pub fn check_occupation(
    state: &GameState,
    operation: &'static str,
    vacated: Option<TerritoryId>,
) -> Result<(), GameError> {
    let empty: Vec<TerritoryId> = state.vacated().into_iter().filter(|&t| Some(t) != vacated).collect();
    ensure(operation, empty.is_empty(), || format!("territories left empty: {empty:?}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::board::{maps, World};

    // a - b - c - d, both regions of two territories
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

    const A: TerritoryId = TerritoryId(0);
    const B: TerritoryId = TerritoryId(1);
    const C: TerritoryId = TerritoryId(2);
    const D: TerritoryId = TerritoryId(3);
    const BLUE: ArmyId = ArmyId(0);
    const GREEN: ArmyId = ArmyId(1);

    #[test]
    fn reinforcement_total_and_ownership() {
        let s = state([(0, 1), (0, 1), (1, 1), (1, 1)]);
        assert_eq!(check_reinforcement(&s, BLUE, &ReinforcementPlan::single(A, 5)), Ok(5));
        assert_eq!(
            check_reinforcement(&s, BLUE, &ReinforcementPlan::single(A, 4)),
            Err(IllegalDecision::WrongReinforcementTotal { placed: 4, owed: 5 })
        );
        assert_eq!(
            check_reinforcement(&s, BLUE, &ReinforcementPlan::single(C, 5)),
            Err(IllegalDecision::NotOwned { territory: C, army: BLUE })
        );
    }

    #[test]
    fn attack_must_leave_one_behind() {
        let s = state([(0, 1), (0, 2), (1, 3), (1, 1)]);
        let ok = AttackDecision { from: B, to: C, units: 1 };
        assert_eq!(check_attack(&s, BLUE, &ok), Ok(()));
        let all = AttackDecision { units: 2, ..ok };
        assert_eq!(
            check_attack(&s, BLUE, &all),
            Err(IllegalDecision::AttackTooLarge { territory: B, committed: 2, max: 1 })
        );
        assert_eq!(check_attack(&s, BLUE, &AttackDecision { units: 0, ..ok }), Err(IllegalDecision::EmptyAttack));
    }

    #[test]
    fn attack_needs_an_adjacent_enemy() {
        let s = state([(0, 4), (0, 2), (1, 3), (1, 1)]);
        assert_eq!(
            check_attack(&s, BLUE, &AttackDecision { from: A, to: B, units: 1 }),
            Err(IllegalDecision::SameArmy(A, B))
        );
        assert_eq!(
            check_attack(&s, BLUE, &AttackDecision { from: A, to: D, units: 1 }),
            Err(IllegalDecision::NotAdjacent(A, D))
        );
        assert_eq!(
            check_attack(&s, GREEN, &AttackDecision { from: A, to: B, units: 1 }),
            Err(IllegalDecision::NotOwned { territory: A, army: GREEN })
        );
    }

    #[test]
    fn defense_bounds() {
        let s = state([(0, 1), (0, 2), (1, 3), (1, 1)]);
        assert!(check_defense(&s, C, &DefenseDecision { units: 3 }).is_ok());
        assert!(check_defense(&s, C, &DefenseDecision { units: 0 }).is_err());
        assert!(check_defense(&s, C, &DefenseDecision { units: 4 }).is_err());
    }

    #[test]
    fn invasion_range_runs_from_dice_to_source_minus_one() {
        let mut s = state([(0, 1), (0, 6), (1, 1), (1, 1)]);
        s.set_units(C, 0);
        let pending = PendingConquest {
            from: B,
            to: C,
            attacker: BLUE,
            defender: GREEN,
            attack_dice: 3,
        };
        assert_eq!(invasion_range(&s, &pending), 3..=5);
        assert!(check_invasion(&s, &pending, &InvasionDecision { units: 5 }).is_ok());
        assert_eq!(
            check_invasion(&s, &pending, &InvasionDecision { units: 2 }),
            Err(IllegalDecision::InvasionOutOfRange { territory: C, chosen: 2, min: 3, max: 5 })
        );
        assert_eq!(check_no_pending(&s), Err(IllegalDecision::ConquestPending(C)));
        assert!(check_occupation(&s, "test", Some(C)).is_ok());
        assert!(check_occupation(&s, "test", None).is_err());
    }

    #[test]
    fn maneuver_between_friendly_neighbours_only() {
        let s = state([(0, 3), (0, 1), (1, 3), (1, 1)]);
        assert!(check_maneuver(&s, BLUE, &ManeuverDecision { from: A, to: B, units: 2 }).is_ok());
        assert_eq!(
            check_maneuver(&s, BLUE, &ManeuverDecision { from: A, to: B, units: 3 }),
            Err(IllegalDecision::ManeuverTooLarge { territory: A, moved: 3, max: 2 })
        );
        assert_eq!(
            check_maneuver(&s, BLUE, &ManeuverDecision { from: B, to: C, units: 1 }),
            Err(IllegalDecision::NotOwned { territory: C, army: BLUE })
        );
        assert_eq!(
            check_maneuver(&s, GREEN, &ManeuverDecision { from: C, to: D, units: 0 }),
            Err(IllegalDecision::EmptyManeuver)
        );
    }
}
