//! The four state transitions: reinforce, attack round, invade, maneuver.
//!
//! Each transition takes the state by mutable reference and applies one
//! validated decision. In `CheckMode::Checked` it re-validates the decision
//! before touching the state and checks its postconditions against a
//! snapshot afterwards; a failed precondition leaves the state unchanged.
//! Callers that need to branch clone the `GameState` first.

use tracing::debug;

use super::checks::{
    check_attack, check_defense, check_invasion, check_maneuver, check_no_pending, check_occupation,
    check_reinforcement, ensure, CheckMode,
};
use super::decision::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};
use crate::board::{ArmyId, GameState, Occupation};
use crate::combat::{resolve_round, BattleOutcome, Dice};
use crate::error::{GameError, IllegalDecision};

/// What one attack round did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: ArmyId,
    pub defender: ArmyId,
    pub outcome: BattleOutcome,
    /// Set when the defending territory was emptied; must be followed by
    /// `do_invade`.
    pub conquest: Option<PendingConquest>,
}

/// Adds the planned units. Returns the number of units placed.
///
/// Nothing is written unless every territory can take its share, so an
/// oversized plan fails with the state unchanged even in trusted mode.
pub fn do_reinforce(
    state: &mut GameState,
    army: ArmyId,
    plan: &ReinforcementPlan,
    mode: CheckMode,
) -> Result<u32, GameError> {
    let before = mode.enabled().then(|| state.clone());
    if mode.enabled() {
        check_no_pending(state)?;
        check_reinforcement(state, army, plan)?;
    }

    let placed = u32::try_from(plan.total()).map_err(|_| IllegalDecision::WrongReinforcementTotal {
        placed: plan.total(),
        owed: state.reinforcement_owed(army),
    })?;
    let updates = plan
        .iter()
        .map(|(territory, units)| {
            state
                .units(territory)
                .checked_add(units)
                .map(|total| (territory, total))
                .ok_or(IllegalDecision::UnitOverflow { territory })
        })
        .collect::<Result<Vec<_>, _>>()?;
    for (territory, units) in updates {
        state.set_units(territory, units);
    }

    if let Some(before) = before {
        let held = |s: &GameState| -> u64 { s.territories_of(army).iter().map(|&t| u64::from(s.units(t))).sum() };
        let gained = held(&*state) - held(&before);
        ensure("reinforce", gained == u64::from(placed), || {
            format!("{army} gained {gained} units, plan placed {placed}")
        })?;
        ensure("reinforce", state.territory_count_of(army) == before.territory_count_of(army), || {
            format!("{army} changed territory count while reinforcing")
        })?;
        check_occupation(state, "reinforce", None)?;
    }
    debug!(army = %army, placed, "reinforce");
    Ok(placed)
}

/// Resolves one combat round between two adjacent enemy territories.
///
/// Ownership never changes here. A territory emptied by the round keeps its
/// previous owner at zero units and the report carries the pending conquest.
pub fn do_attack_round(
    state: &mut GameState,
    decision: &AttackDecision,
    defense: &DefenseDecision,
    dice: &mut dyn Dice,
    mode: CheckMode,
) -> Result<AttackReport, GameError> {
    let AttackDecision { from, to, units } = *decision;
    let (attacker, defender) = match (state.occupant(from), state.occupant(to)) {
        (Some(a), Some(d)) => (a, d),
        _ => return Err(IllegalDecision::NotAdjacent(from, to).into()),
    };
    if mode.enabled() {
        check_no_pending(state)?;
        check_attack(state, attacker, decision)?;
        check_defense(state, to, defense)?;
    }
    let before = mode.enabled().then(|| state.clone());

    let outcome = resolve_round(state.units(from), state.units(to), units, defense.units, dice)?;
    state.set_units(from, outcome.attacker_remaining);
    state.set_units(to, outcome.defender_remaining);

    let conquest = outcome.conquered.then_some(PendingConquest {
        from,
        to,
        attacker,
        defender,
        attack_dice: outcome.attack_dice,
    });

    if let Some(before) = before {
        let lost_a = before.army_units(attacker) - state.army_units(attacker);
        let lost_d = before.army_units(defender) - state.army_units(defender);
        ensure("attack", (lost_a, lost_d) == (outcome.attacker_losses, outcome.defender_losses), || {
            format!(
                "losses {lost_a}/{lost_d} do not match outcome {}/{}",
                outcome.attacker_losses, outcome.defender_losses
            )
        })?;
        ensure("attack", state.occupant(to) == Some(defender), || {
            format!("ownership of {to} changed during the round")
        })?;
        check_occupation(state, "attack", outcome.conquered.then_some(to))?;
    }
    debug!(
        from = %from,
        to = %to,
        attacker = %attacker,
        defender = %defender,
        attacker_losses = outcome.attacker_losses,
        defender_losses = outcome.defender_losses,
        conquered = outcome.conquered,
        "attack round"
    );
    Ok(AttackReport {
        attacker,
        defender,
        outcome,
        conquest,
    })
}

/// Moves the attacker into a just-emptied territory.
pub fn do_invade(
    state: &mut GameState,
    pending: &PendingConquest,
    invasion: &InvasionDecision,
    mode: CheckMode,
) -> Result<(), GameError> {
    if mode.enabled() {
        check_invasion(state, pending, invasion)?;
    }
    let before = mode.enabled().then(|| state.clone());

    let PendingConquest { from, to, attacker, .. } = *pending;
    state.set_units(from, state.units(from) - invasion.units);
    state.set(
        to,
        Occupation {
            army: attacker,
            units: invasion.units,
        },
    );

    if let Some(before) = before {
        ensure("invade", state.army_units(attacker) == before.army_units(attacker), || {
            format!("{attacker} unit total changed while invading")
        })?;
        ensure("invade", state.is_owned_by(to, attacker), || format!("{to} not transferred"))?;
        check_occupation(state, "invade", None)?;
    }
    debug!(from = %from, to = %to, army = %attacker, units = invasion.units, "invade");
    Ok(())
}

/// Applies an optional end-of-turn maneuver. `None` is a legal no-op.
pub fn do_maneuver(
    state: &mut GameState,
    army: ArmyId,
    maneuver: Option<&ManeuverDecision>,
    mode: CheckMode,
) -> Result<(), GameError> {
    let Some(&ManeuverDecision { from, to, units }) = maneuver else {
        debug!(army = %army, "no maneuver");
        return Ok(());
    };
    if mode.enabled() {
        check_no_pending(state)?;
        check_maneuver(state, army, &ManeuverDecision { from, to, units })?;
    }
    let before = mode.enabled().then(|| state.clone());

    state.set_units(from, state.units(from) - units);
    state.set_units(to, state.units(to) + units);

    if let Some(before) = before {
        ensure("maneuver", state.army_units(army) == before.army_units(army), || {
            format!("{army} unit total changed while maneuvering")
        })?;
        check_occupation(state, "maneuver", None)?;
    }
    debug!(army = %army, from = %from, to = %to, units, "maneuver");
    Ok(())
}
