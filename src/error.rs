//! Error taxonomy.
//!
//! Three families of failure exist and none of them is recoverable: a
//! malformed world or setup (`ConfigError`), a strategy returning a decision
//! the rules forbid (`IllegalDecision`), and the combat resolver being fed
//! impossible inputs (`ResolverError`). `GameError` wraps all three so they
//! propagate with `?` up to the caller.

use crate::board::{ArmyId, TerritoryId};

/// Malformed world model or initial setup. Detected before any play.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("duplicate territory name '{0}'")]
    DuplicateTerritory(String),

    #[error("duplicate region name '{0}'")]
    DuplicateRegion(String),

    #[error("region '{0}' has no territories")]
    EmptyRegion(String),

    #[error("region '{0}' must grant a strictly positive bonus")]
    ZeroBonus(String),

    #[error("territory '{0}' appears in the adjacency table but in no region")]
    TerritoryWithoutRegion(String),

    #[error("territory '{0}' has no adjacency entry")]
    MissingAdjacency(String),

    #[error("territory '{0}' has no neighbours")]
    IsolatedTerritory(String),

    #[error("territory '{0}' is adjacent to itself")]
    SelfAdjacency(String),

    #[error("adjacency is not symmetric: '{0}' lists '{1}' but not the reverse")]
    AsymmetricAdjacency(String, String),

    #[error("board has {0} regions, at most 256 are supported")]
    TooManyRegions(usize),

    #[error("board has at least {0} territories, at most 65536 are supported")]
    TooManyTerritories(usize),

    #[error("at least one army is required")]
    NoArmies,

    #[error("{0} armies requested but only {1} colours exist")]
    TooManyArmies(usize, usize),

    #[error("{territories} territories cannot host {armies} armies")]
    TooFewTerritories { territories: usize, armies: usize },

    #[error("initial assignment covers {assigned} of {expected} territories")]
    IncompleteAssignment { assigned: usize, expected: usize },

    #[error("territory {0} is assigned twice")]
    DuplicateAssignment(TerritoryId),

    #[error("territory {0} starts with no units")]
    EmptyAssignment(TerritoryId),

    #[error("unknown army {0}")]
    UnknownArmy(ArmyId),

    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),

    #[error("unknown board '{0}'")]
    UnknownBoard(String),

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("{strategies} strategies given for {armies} armies")]
    StrategyCountMismatch { strategies: usize, armies: usize },

    #[error("invalid board file: {0}")]
    InvalidBoardFile(String),

    #[error("invalid configuration file: {0}")]
    InvalidConfigFile(String),

    #[error("turn order must list every army exactly once")]
    InvalidTurnOrder,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// A decision that violates the rules of the game.
///
/// Raised at whichever boundary first sees the decision; it always points at
/// a strategy bug, never at a game situation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalDecision {
    #[error("army {0} has been eliminated")]
    EliminatedArmy(ArmyId),

    #[error("territory {territory} is not owned by army {army}")]
    NotOwned { territory: TerritoryId, army: ArmyId },

    #[error("territories {0} and {1} are not adjacent")]
    NotAdjacent(TerritoryId, TerritoryId),

    #[error("territories {0} and {1} are occupied by the same army")]
    SameArmy(TerritoryId, TerritoryId),

    #[error("territories {0} and {1} are occupied by different armies")]
    DifferentArmies(TerritoryId, TerritoryId),

    #[error("reinforcement plan places {placed} units but {owed} are owed")]
    WrongReinforcementTotal { placed: u64, owed: u32 },

    #[error("attack from {territory} commits {committed} units but at most {max} may leave")]
    AttackTooLarge { territory: TerritoryId, committed: u32, max: u32 },

    #[error("at least one unit must attack")]
    EmptyAttack,

    #[error("defence of {territory} uses {chosen} units but only {available} are present")]
    DefenseOutOfRange { territory: TerritoryId, chosen: u32, available: u32 },

    #[error("invasion of {territory} with {chosen} units is outside {min}..={max}")]
    InvasionOutOfRange { territory: TerritoryId, chosen: u32, min: u32, max: u32 },

    #[error("territory {0} has not just been conquered")]
    NoPendingConquest(TerritoryId),

    #[error("territory {0} is awaiting an invasion")]
    ConquestPending(TerritoryId),

    #[error("maneuver from {territory} moves {moved} units but at most {max} may leave")]
    ManeuverTooLarge { territory: TerritoryId, moved: u32, max: u32 },

    #[error("at least one unit must be moved")]
    EmptyManeuver,

    #[error("reinforcing {territory} would exceed the unit capacity of a territory")]
    UnitOverflow { territory: TerritoryId },

    #[error("territory {0} is empty")]
    EmptyTerritory(TerritoryId),

    #[error("attacker commits {committed} units with only {available} on the territory")]
    AttackerOverCommitted { committed: u32, available: u32 },

    #[error("defender commits {committed} units with only {available} on the territory")]
    DefenderOverCommitted { committed: u32, available: u32 },
}

/// The combat resolver was called with inputs outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    #[error("{attack}x{defend} dice is outside 1..=3 x 1..=2")]
    DiceOutOfRange { attack: u32, defend: u32 },

    #[error("combat needs units on both sides (attacker {attacker}, defender {defender})")]
    NonPositiveUnits { attacker: u32, defender: u32 },

    #[error("die face {0} is outside 1..=6")]
    InvalidFace(u8),
}

/// Any failure raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("illegal decision: {0}")]
    Illegal(#[from] IllegalDecision),

    #[error("resolver error: {0}")]
    Resolver(#[from] ResolverError),

    #[error("postcondition violated after {operation}: {detail}")]
    Postcondition { operation: &'static str, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_decision_wraps_into_game_error() {
        let err: GameError = IllegalDecision::EmptyAttack.into();
        assert!(matches!(err, GameError::Illegal(IllegalDecision::EmptyAttack)));
        assert_eq!(err.to_string(), "illegal decision: at least one unit must attack");
    }

    #[test]
    fn config_error_message_names_both_territories() {
        let err = ConfigError::AsymmetricAdjacency("Peru".into(), "Brazil".into());
        let msg = err.to_string();
        assert!(msg.contains("Peru") && msg.contains("Brazil"), "{msg}");
    }
}
