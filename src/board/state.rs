//! Game state: who occupies each territory and with how many units.
//!
//! The state carries a shared handle to its `World` so that every query and
//! transition needs a single argument. Derived views (territories per army,
//! regions fully held, reinforcement owed) are recomputed on demand rather
//! than cached, so there is no second copy of ownership to drift.

use std::sync::Arc;

use super::world::{ArmyId, RegionId, TerritoryId, World};
use crate::error::ConfigError;

/// Minimum reinforcement an undefeated army receives each turn.
pub const MIN_REINFORCEMENT: u32 = 3;

/// Occupation of one territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupation {
    pub army: ArmyId,
    /// Zero only while a conquest awaits its invasion.
    pub units: u32,
}

/// Complete occupation snapshot over a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    world: Arc<World>,
    occupation: Vec<Occupation>,
}

impl GameState {
    /// Builds a state from an explicit assignment of every territory.
    pub fn from_assignments(
        world: Arc<World>,
        assignments: &[(TerritoryId, ArmyId, u32)],
    ) -> Result<GameState, ConfigError> {
        let mut slots: Vec<Option<Occupation>> = vec![None; world.territory_count()];
        for &(territory, army, units) in assignments {
            if !world.contains(territory) {
                return Err(ConfigError::UnknownTerritory(territory));
            }
            if !world.has_army(army) {
                return Err(ConfigError::UnknownArmy(army));
            }
            if units == 0 {
                return Err(ConfigError::EmptyAssignment(territory));
            }
            let slot = &mut slots[territory.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateAssignment(territory));
            }
            *slot = Some(Occupation { army, units });
        }

        let assigned = slots.iter().filter(|s| s.is_some()).count();
        let occupation: Option<Vec<Occupation>> = slots.into_iter().collect();
        match occupation {
            Some(occupation) => Ok(GameState { world, occupation }),
            None => Err(ConfigError::IncompleteAssignment {
                assigned,
                expected: world.territory_count(),
            }),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Shared handle to the world, for building sibling states.
    pub fn world_handle(&self) -> Arc<World> {
        Arc::clone(&self.world)
    }

    /// Occupation of every territory, indexed by `TerritoryId::index()`.
    pub fn occupation(&self) -> &[Occupation] {
        &self.occupation
    }

    pub fn get(&self, territory: TerritoryId) -> Option<Occupation> {
        self.occupation.get(territory.index()).copied()
    }

    /// Owning army of a territory, `None` for a foreign id.
    pub fn occupant(&self, territory: TerritoryId) -> Option<ArmyId> {
        self.get(territory).map(|o| o.army)
    }

    /// Units on a territory, zero for a foreign id.
    pub fn units(&self, territory: TerritoryId) -> u32 {
        self.get(territory).map_or(0, |o| o.units)
    }

    pub fn is_owned_by(&self, territory: TerritoryId, army: ArmyId) -> bool {
        self.occupant(territory) == Some(army)
    }

    /// Territories held by an army, in index order.
    pub fn territories_of(&self, army: ArmyId) -> Vec<TerritoryId> {
        self.world
            .territory_ids()
            .filter(|&t| self.occupation[t.index()].army == army)
            .collect()
    }

    pub fn territory_count_of(&self, army: ArmyId) -> usize {
        self.occupation.iter().filter(|o| o.army == army).count()
    }

    /// Total units an army has on the board.
    pub fn army_units(&self, army: ArmyId) -> u32 {
        self.occupation
            .iter()
            .filter(|o| o.army == army)
            .map(|o| o.units)
            .sum()
    }

    /// An army holding no territory has been eliminated.
    pub fn is_defeated(&self, army: ArmyId) -> bool {
        !self.occupation.iter().any(|o| o.army == army)
    }

    /// Armies present anywhere in a region, deduplicated, in seat order.
    pub fn armies_in_region(&self, region: RegionId) -> Vec<ArmyId> {
        let mut armies: Vec<ArmyId> = self
            .world
            .region(region)
            .map(|r| r.territories.iter().map(|t| self.occupation[t.index()].army).collect())
            .unwrap_or_default();
        armies.sort_unstable();
        armies.dedup();
        armies
    }

    /// The army holding every territory of a region, if any.
    pub fn region_occupant(&self, region: RegionId) -> Option<ArmyId> {
        match self.armies_in_region(region).as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Regions entirely held by an army.
    pub fn regions_of(&self, army: ArmyId) -> Vec<RegionId> {
        self.world
            .region_ids()
            .filter(|&r| self.region_occupant(r) == Some(army))
            .collect()
    }

    /// Units owed to an army at the start of its turn:
    /// `max(3, territories / 3) + sum of held region bonuses`.
    ///
    /// Zero for an eliminated army.
    pub fn reinforcement_owed(&self, army: ArmyId) -> u32 {
        let held = self.territory_count_of(army) as u32;
        if held == 0 {
            return 0;
        }
        let bonus: u32 = self
            .regions_of(army)
            .iter()
            .filter_map(|&r| self.world.region(r))
            .map(|r| r.bonus)
            .sum();
        (held / 3).max(MIN_REINFORCEMENT) + bonus
    }

    /// Armies still holding at least one territory, in seat order.
    pub fn undefeated_armies(&self) -> Vec<ArmyId> {
        self.world.army_ids().filter(|&a| !self.is_defeated(a)).collect()
    }

    /// The army holding every territory, if the game is decided.
    pub fn winner(&self) -> Option<ArmyId> {
        let first = self.occupation.first()?.army;
        self.occupation.iter().all(|o| o.army == first).then_some(first)
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Adjacent pairs held by different armies: `(t1, a1, t2, a2)`.
    pub fn fronts(&self) -> Vec<(TerritoryId, ArmyId, TerritoryId, ArmyId)> {
        self.world
            .adjacencies()
            .filter_map(|(t1, t2)| {
                let a1 = self.occupation[t1.index()].army;
                let a2 = self.occupation[t2.index()].army;
                (a1 != a2).then_some((t1, a1, t2, a2))
            })
            .collect()
    }

    /// Enemy territories adjacent to `territory`.
    pub fn enemy_neighbours(&self, territory: TerritoryId) -> Vec<TerritoryId> {
        let Some(owner) = self.occupant(territory) else {
            return Vec::new();
        };
        self.world
            .neighbours(territory)
            .iter()
            .copied()
            .filter(|&n| self.occupation[n.index()].army != owner)
            .collect()
    }

    /// Friendly territories adjacent to `territory`.
    pub fn friendly_neighbours(&self, territory: TerritoryId) -> Vec<TerritoryId> {
        let Some(owner) = self.occupant(territory) else {
            return Vec::new();
        };
        self.world
            .neighbours(territory)
            .iter()
            .copied()
            .filter(|&n| self.occupation[n.index()].army == owner)
            .collect()
    }

    /// Every `(source, target, max_committed)` an army may legally attack with.
    pub fn attack_options(&self, army: ArmyId) -> Vec<(TerritoryId, TerritoryId, u32)> {
        self.world
            .adjacencies()
            .filter(|&(from, to)| {
                let f = self.occupation[from.index()];
                let t = self.occupation[to.index()];
                f.army == army && t.army != army && f.units > 1 && t.units > 0
            })
            .map(|(from, to)| (from, to, self.occupation[from.index()].units - 1))
            .collect()
    }

    /// Every `(source, destination, max_moved)` an army may legally maneuver.
    pub fn maneuver_options(&self, army: ArmyId) -> Vec<(TerritoryId, TerritoryId, u32)> {
        self.world
            .adjacencies()
            .filter(|&(from, to)| {
                let f = self.occupation[from.index()];
                let t = self.occupation[to.index()];
                f.army == army && t.army == army && f.units > 1 && t.units > 0
            })
            .map(|(from, to)| (from, to, self.occupation[from.index()].units - 1))
            .collect()
    }

    /// Territories currently at zero units (awaiting invasion).
    pub fn vacated(&self) -> Vec<TerritoryId> {
        self.world
            .territory_ids()
            .filter(|t| self.occupation[t.index()].units == 0)
            .collect()
    }

    /// Raw write access for the transition engine.
    pub(crate) fn set(&mut self, territory: TerritoryId, occupation: Occupation) {
        self.occupation[territory.index()] = occupation;
    }

    pub(crate) fn set_units(&mut self, territory: TerritoryId, units: u32) {
        self.occupation[territory.index()].units = units;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;

    fn line_world() -> Arc<World> {
        // a - b - c - d, regions {a, b} (bonus 2) and {c, d} (bonus 5)
        let spec = maps::from_tables(
            "line",
            &[("west", Some(2), &["a", "b"]), ("east", Some(5), &["c", "d"])],
            &[("a", &["b"]), ("b", &["a", "c"]), ("c", &["b", "d"]), ("d", &["c"])],
        );
        Arc::new(World::from_spec(&spec, 2).unwrap())
    }

    fn state(world: Arc<World>, owners: [(u8, u32); 4]) -> GameState {
        let assignments: Vec<_> = owners
            .iter()
            .enumerate()
            .map(|(i, &(a, u))| (TerritoryId(i as u16), ArmyId(a), u))
            .collect();
        GameState::from_assignments(world, &assignments).unwrap()
    }

    #[test]
    fn queries_over_mixed_ownership() {
        let s = state(line_world(), [(0, 3), (0, 1), (1, 4), (1, 2)]);
        assert_eq!(s.territories_of(ArmyId(0)), vec![TerritoryId(0), TerritoryId(1)]);
        assert_eq!(s.army_units(ArmyId(0)), 4);
        assert_eq!(s.army_units(ArmyId(1)), 6);
        assert_eq!(s.regions_of(ArmyId(0)), vec![RegionId(0)]);
        assert_eq!(s.regions_of(ArmyId(1)), vec![RegionId(1)]);
        assert_eq!(s.fronts().len(), 2);
        assert_eq!(s.enemy_neighbours(TerritoryId(1)), vec![TerritoryId(2)]);
        assert_eq!(s.friendly_neighbours(TerritoryId(1)), vec![TerritoryId(0)]);
        assert_eq!(s.winner(), None);
        assert_eq!(s.undefeated_armies(), vec![ArmyId(0), ArmyId(1)]);
    }

    #[test]
    fn reinforcement_is_three_plus_bonuses() {
        let s = state(line_world(), [(0, 1), (0, 1), (1, 1), (1, 1)]);
        assert_eq!(s.reinforcement_owed(ArmyId(0)), 3 + 2);
        assert_eq!(s.reinforcement_owed(ArmyId(1)), 3 + 5);

        let s = state(line_world(), [(0, 1), (1, 1), (0, 1), (1, 1)]);
        assert_eq!(s.reinforcement_owed(ArmyId(0)), 3);
    }

    #[test]
    fn winner_and_defeat() {
        let s = state(line_world(), [(1, 1), (1, 1), (1, 1), (1, 1)]);
        assert_eq!(s.winner(), Some(ArmyId(1)));
        assert!(s.is_defeated(ArmyId(0)));
        assert_eq!(s.reinforcement_owed(ArmyId(0)), 0);
        assert_eq!(s.reinforcement_owed(ArmyId(1)), 3 + 2 + 5);
    }

    #[test]
    fn attack_and_maneuver_options_leave_one_behind() {
        let s = state(line_world(), [(0, 3), (0, 1), (1, 4), (1, 2)]);
        assert_eq!(s.attack_options(ArmyId(0)), vec![]);
        assert_eq!(s.maneuver_options(ArmyId(0)), vec![(TerritoryId(0), TerritoryId(1), 2)]);
        assert_eq!(s.attack_options(ArmyId(1)), vec![(TerritoryId(2), TerritoryId(1), 3)]);
    }

    #[test]
    fn assignment_must_cover_every_territory_once() {
        let world = line_world();
        let partial = [(TerritoryId(0), ArmyId(0), 1)];
        assert_eq!(
            GameState::from_assignments(world.clone(), &partial),
            Err(ConfigError::IncompleteAssignment { assigned: 1, expected: 4 })
        );
        let twice = [(TerritoryId(0), ArmyId(0), 1), (TerritoryId(0), ArmyId(1), 1)];
        assert_eq!(
            GameState::from_assignments(world.clone(), &twice),
            Err(ConfigError::DuplicateAssignment(TerritoryId(0)))
        );
        let empty = [(TerritoryId(0), ArmyId(0), 0)];
        assert_eq!(
            GameState::from_assignments(world, &empty),
            Err(ConfigError::EmptyAssignment(TerritoryId(0)))
        );
    }
}
