//! Decision records exchanged between strategies and the transition engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::board::{ArmyId, TerritoryId};

/// Units to add per owned territory at the start of a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReinforcementPlan {
    placements: BTreeMap<TerritoryId, u32>,
}

impl ReinforcementPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything on a single territory.
    pub fn single(territory: TerritoryId, units: u32) -> Self {
        let mut plan = Self::new();
        plan.add(territory, units);
        plan
    }

    /// Adds units to a territory, accumulating with earlier placements.
    /// Saturates at `u32::MAX`, which no legal plan reaches.
    pub fn add(&mut self, territory: TerritoryId, units: u32) {
        if units > 0 {
            let slot = self.placements.entry(territory).or_default();
            *slot = slot.saturating_add(units);
        }
    }

    pub fn get(&self, territory: TerritoryId) -> u32 {
        self.placements.get(&territory).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, u32)> + '_ {
        self.placements.iter().map(|(&t, &u)| (t, u))
    }

    /// Units placed over every territory, widened so it cannot wrap.
    pub fn total(&self) -> u64 {
        self.placements.values().map(|&u| u64::from(u)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl FromIterator<(TerritoryId, u32)> for ReinforcementPlan {
    fn from_iter<I: IntoIterator<Item = (TerritoryId, u32)>>(iter: I) -> Self {
        let mut plan = Self::new();
        for (t, u) in iter {
            plan.add(t, u);
        }
        plan
    }
}

/// One round of attack from `from` into `to` with `units` committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AttackDecision {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub units: u32,
}

impl fmt::Display for AttackDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({} units)", self.from, self.to, self.units)
    }
}

/// Units the defender engages in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DefenseDecision {
    pub units: u32,
}

/// Units moved into a just-conquered territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InvasionDecision {
    pub units: u32,
}

/// End-of-turn move between two adjacent friendly territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ManeuverDecision {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub units: u32,
}

/// A territory emptied by the last attack round and not yet invaded.
///
/// Returned by an attack round that conquers; the only legal next
/// transition is the matching invasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PendingConquest {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub attacker: ArmyId,
    pub defender: ArmyId,
    /// Dice the attacker rolled in the conquering round.
    pub attack_dice: u32,
}
