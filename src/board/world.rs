//! The immutable world model: regions, territories, armies, and adjacency.
//!
//! A `World` is built once from a `BoardSpec` and never mutated afterwards.
//! Territories, regions, and armies are addressed by dense index newtypes so
//! the game state can store occupation in a plain vector indexed by
//! `TerritoryId::index()`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Colours available to armies, in seating order.
pub const ARMY_COLOURS: [&str; 6] = ["blue", "green", "magenta", "red", "white", "yellow"];

/// Dense index of a territory within its world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub u16);

impl TerritoryId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dense index of a region within its world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u8);

impl RegionId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense index of an army; also its seat in the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArmyId(pub u8);

impl ArmyId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArmyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ARMY_COLOURS.get(self.index()) {
            Some(colour) => f.write_str(colour),
            None => write!(f, "army{}", self.0),
        }
    }
}

/// A group of territories granting a bonus to an army holding all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub bonus: u32,
    pub territories: Vec<TerritoryId>,
}

/// A single territory of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub name: String,
    pub region: RegionId,
    /// Sorted, deduplicated neighbour list.
    pub neighbours: Vec<TerritoryId>,
}

/// A player faction. Its situation is derived entirely from the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Army {
    pub id: ArmyId,
    pub colour: &'static str,
}

/// Serializable description of a board, as loaded from a built-in table or a
/// JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub name: String,
    pub regions: Vec<RegionSpec>,
    /// Neighbour map. Must be symmetric.
    pub adjacency: BTreeMap<String, Vec<String>>,
}

/// One region of a `BoardSpec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    /// Reinforcement bonus; defaults to half the territory count, rounded up.
    #[serde(default)]
    pub bonus: Option<u32>,
    pub territories: Vec<String>,
}

impl BoardSpec {
    /// Parses a board description from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidBoardFile(e.to_string()))
    }
}

/// The permanent part of a game: topology and roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    name: String,
    regions: Vec<Region>,
    territories: Vec<Territory>,
    armies: Vec<Army>,
    /// Row-major `territories.len()`² adjacency matrix.
    adjacent: Vec<bool>,
    by_name: HashMap<String, TerritoryId>,
}

impl World {
    /// Validates a board description and builds the world for `army_count`
    /// armies.
    pub fn from_spec(spec: &BoardSpec, army_count: usize) -> Result<World, ConfigError> {
        if army_count == 0 {
            return Err(ConfigError::NoArmies);
        }
        if army_count > ARMY_COLOURS.len() {
            return Err(ConfigError::TooManyArmies(army_count, ARMY_COLOURS.len()));
        }

        let mut regions = Vec::with_capacity(spec.regions.len());
        let mut territories: Vec<Territory> = Vec::new();
        let mut by_name: HashMap<String, TerritoryId> = HashMap::new();

        for (r, region) in spec.regions.iter().enumerate() {
            if spec.regions[..r].iter().any(|other| other.name == region.name) {
                return Err(ConfigError::DuplicateRegion(region.name.clone()));
            }
            if region.territories.is_empty() {
                return Err(ConfigError::EmptyRegion(region.name.clone()));
            }
            let n = region.territories.len() as u32;
            let bonus = region.bonus.unwrap_or(n / 2 + n % 2);
            if bonus == 0 {
                return Err(ConfigError::ZeroBonus(region.name.clone()));
            }

            let region_id = u8::try_from(r)
                .map(RegionId)
                .map_err(|_| ConfigError::TooManyRegions(spec.regions.len()))?;
            let mut members = Vec::with_capacity(region.territories.len());
            for name in &region.territories {
                if by_name.contains_key(name) {
                    return Err(ConfigError::DuplicateTerritory(name.clone()));
                }
                let id = u16::try_from(territories.len())
                    .map(TerritoryId)
                    .map_err(|_| ConfigError::TooManyTerritories(territories.len() + 1))?;
                by_name.insert(name.clone(), id);
                territories.push(Territory {
                    name: name.clone(),
                    region: region_id,
                    neighbours: Vec::new(),
                });
                members.push(id);
            }
            regions.push(Region {
                name: region.name.clone(),
                bonus,
                territories: members,
            });
        }

        for (name, neighbours) in &spec.adjacency {
            let id = *by_name
                .get(name)
                .ok_or_else(|| ConfigError::TerritoryWithoutRegion(name.clone()))?;
            let mut ids = Vec::with_capacity(neighbours.len());
            for other in neighbours {
                let other_id = *by_name
                    .get(other)
                    .ok_or_else(|| ConfigError::TerritoryWithoutRegion(other.clone()))?;
                if other_id == id {
                    return Err(ConfigError::SelfAdjacency(name.clone()));
                }
                ids.push(other_id);
            }
            ids.sort_unstable();
            ids.dedup();
            territories[id.index()].neighbours = ids;
        }

        let n = territories.len();
        let mut adjacent = vec![false; n * n];
        for (i, territory) in territories.iter().enumerate() {
            if !spec.adjacency.contains_key(&territory.name) {
                return Err(ConfigError::MissingAdjacency(territory.name.clone()));
            }
            if territory.neighbours.is_empty() {
                return Err(ConfigError::IsolatedTerritory(territory.name.clone()));
            }
            for &j in &territory.neighbours {
                adjacent[i * n + j.index()] = true;
            }
        }
        for (i, territory) in territories.iter().enumerate() {
            for &j in &territory.neighbours {
                if !adjacent[j.index() * n + i] {
                    return Err(ConfigError::AsymmetricAdjacency(
                        territory.name.clone(),
                        territories[j.index()].name.clone(),
                    ));
                }
            }
        }

        if n < army_count {
            return Err(ConfigError::TooFewTerritories {
                territories: n,
                armies: army_count,
            });
        }

        let armies = (0..army_count)
            .map(|i| Army {
                id: ArmyId(i as u8),
                colour: ARMY_COLOURS[i],
            })
            .collect();

        Ok(World {
            name: spec.name.clone(),
            regions,
            territories,
            armies,
            adjacent,
            by_name,
        })
    }

    /// Board name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn armies(&self) -> &[Army] {
        &self.armies
    }

    pub fn territory_count(&self) -> usize {
        self.territories.len()
    }

    pub fn army_count(&self) -> usize {
        self.armies.len()
    }

    /// Iterates over all territory ids in index order.
    pub fn territory_ids(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        (0..self.territories.len()).map(|i| TerritoryId(i as u16))
    }

    /// Iterates over all army ids in seating order.
    pub fn army_ids(&self) -> impl Iterator<Item = ArmyId> + '_ {
        self.armies.iter().map(|a| a.id)
    }

    /// Iterates over all region ids in index order.
    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.regions.len()).map(|i| RegionId(i as u8))
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    /// Returns true if `id` names a territory of this world.
    pub fn contains(&self, id: TerritoryId) -> bool {
        id.index() < self.territories.len()
    }

    pub fn has_army(&self, army: ArmyId) -> bool {
        army.index() < self.armies.len()
    }

    /// Looks up a territory by name.
    pub fn territory_id(&self, name: &str) -> Option<TerritoryId> {
        self.by_name.get(name).copied()
    }

    /// Display name of a territory, or `"?"` for a foreign id.
    pub fn territory_name(&self, id: TerritoryId) -> &str {
        self.territory(id).map_or("?", |t| t.name.as_str())
    }

    /// Neighbours of a territory (empty for a foreign id).
    pub fn neighbours(&self, id: TerritoryId) -> &[TerritoryId] {
        self.territory(id).map_or(&[], |t| t.neighbours.as_slice())
    }

    /// O(1) adjacency test. False for foreign ids.
    pub fn is_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        let n = self.territories.len();
        a.index() < n && b.index() < n && self.adjacent[a.index() * n + b.index()]
    }

    /// Every directed adjacency pair, both directions included.
    pub fn adjacencies(&self) -> impl Iterator<Item = (TerritoryId, TerritoryId)> + '_ {
        self.territory_ids()
            .flat_map(move |t| self.neighbours(t).iter().map(move |&n| (t, n)))
    }

    /// Pairs of distinct regions sharing at least one border.
    pub fn region_adjacencies(&self) -> Vec<(RegionId, RegionId)> {
        let mut pairs: Vec<(RegionId, RegionId)> = self
            .adjacencies()
            .filter_map(|(a, b)| {
                let ra = self.territories[a.index()].region;
                let rb = self.territories[b.index()].region;
                (ra != rb).then_some((ra, rb))
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}
