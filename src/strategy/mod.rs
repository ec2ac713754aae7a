//! Automated players.
//!
//! A strategy answers the five questions the orchestrator asks during a
//! turn. It sees the state read-only and draws any randomness from the
//! generator it is handed, so a game is reproducible from its seed. The
//! orchestrator validates every answer before applying it.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;

use crate::board::{ArmyId, GameState, TerritoryId};
use crate::error::ConfigError;
use crate::rules::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};

pub(crate) mod moves;
pub mod neutral;
pub mod probabilistic;
pub mod random;

pub use neutral::NeutralStrategy;
pub use probabilistic::ProbabilisticStrategy;
pub use random::RandomStrategy;

/// Decision capability of one automated player.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;

    /// Distributes exactly `owed` units over the army's territories.
    fn reinforce(&self, state: &GameState, army: ArmyId, owed: u32, rng: &mut SmallRng) -> ReinforcementPlan;

    /// Next attack round, or `None` to end the attack phase.
    fn attack(&self, state: &GameState, army: ArmyId, rng: &mut SmallRng) -> Option<AttackDecision>;

    /// Units to defend `territory` with against `committed` attacking units.
    fn defend(
        &self,
        state: &GameState,
        territory: TerritoryId,
        attacker: ArmyId,
        committed: u32,
        rng: &mut SmallRng,
    ) -> DefenseDecision;

    /// Units to move into a conquered territory, within `range`.
    fn invade(
        &self,
        state: &GameState,
        conquest: &PendingConquest,
        range: RangeInclusive<u32>,
        rng: &mut SmallRng,
    ) -> InvasionDecision;

    /// Optional end-of-turn move.
    fn maneuver(&self, state: &GameState, army: ArmyId, rng: &mut SmallRng) -> Option<ManeuverDecision>;
}

/// Names accepted by [`strategy_by_name`].
pub const STRATEGY_NAMES: [&str; 5] = ["random", "uniform", "neutral", "neutral-uniform", "probabilistic"];

/// Looks a strategy up by its registry name.
pub fn strategy_by_name(name: &str) -> Result<Box<dyn Strategy>, ConfigError> {
    let strategy: Box<dyn Strategy> = match name {
        "random" => Box::new(RandomStrategy::fully_random()),
        "uniform" => Box::new(RandomStrategy::uniform()),
        "neutral" => Box::new(NeutralStrategy::fully_random()),
        "neutral-uniform" => Box::new(NeutralStrategy::uniform()),
        "probabilistic" => Box::new(ProbabilisticStrategy::default()),
        other => return Err(ConfigError::UnknownStrategy(other.to_string())),
    };
    Ok(strategy)
}
