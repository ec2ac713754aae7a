//! Batches of independent games played in parallel.
//!
//! Each game gets its own world handle, deal, dice and strategy instances,
//! seeded with `base seed + game index`, so games share nothing mutable and
//! the batch is reproducible whatever the thread count. Seat order rotates
//! from game to game so no strategy always moves first.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::orchestrator::Game;
use crate::board::{maps, random_initial_state, setup_rng, ArmyId, World};
use crate::config::TournamentConfig;
use crate::error::{ConfigError, GameError};
use crate::strategy::{strategy_by_name, Strategy};

/// Per-strategy results. Strategy `k` of the configuration always plays
/// army `k`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecord {
    pub strategy: String,
    pub army: String,
    pub wins: usize,
    pub average_placement: f64,
}

/// Aggregated results of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub board: String,
    pub games: usize,
    pub base_seed: u64,
    pub undecided: usize,
    pub average_rounds: f64,
    pub records: Vec<StrategyRecord>,
}

/// What the summary needs from one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub index: usize,
    pub seed: u64,
    pub winner: Option<ArmyId>,
    pub rounds: u32,
    pub first_to_move: ArmyId,
    /// 1-based placement per army.
    pub placements: Vec<usize>,
}

fn build_strategies(names: &[String]) -> Result<Vec<Box<dyn Strategy>>, ConfigError> {
    names.iter().map(|n| strategy_by_name(n)).collect()
}

/// Plays game number `index` of a tournament.
pub fn play_one(
    config: &TournamentConfig,
    world: &Arc<World>,
    base_seed: u64,
    index: usize,
) -> Result<GameResult, GameError> {
    let game_config = config.game_config(base_seed, index);
    let seed = game_config.seed;
    let armies = world.army_count();
    let state = random_initial_state(Arc::clone(world), &mut setup_rng(seed))?;

    let order: Vec<ArmyId> = (0..armies).map(|k| ArmyId(((k + index) % armies) as u8)).collect();
    let outcome = Game::new(state, build_strategies(&config.strategies)?, &game_config)?
        .with_turn_order(&order)?
        .run()?;

    let placements = world
        .army_ids()
        .map(|a| outcome.placement(a).unwrap_or(armies))
        .collect();
    Ok(GameResult {
        index,
        seed,
        winner: outcome.winner,
        rounds: outcome.rounds,
        first_to_move: order[0],
        placements,
    })
}

/// Runs every game of the tournament and aggregates the results.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentSummary, GameError> {
    let spec = maps::by_name(&config.board)?;
    let world = Arc::new(World::from_spec(&spec, config.strategies.len())?);
    // fail on unknown names before spawning anything
    build_strategies(&config.strategies)?;

    let base_seed = match config.seed {
        0 => rand::random::<u64>().max(1),
        seed => seed,
    };
    info!(
        games = config.games,
        board = %config.board,
        seed = base_seed,
        threads = config.threads,
        "tournament started"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;
    let results: Vec<GameResult> = pool.install(|| {
        (0..config.games)
            .into_par_iter()
            .map(|i| play_one(config, &world, base_seed, i))
            .collect::<Result<_, _>>()
    })?;

    let summary = summarize(config, &world, base_seed, &results);
    info!(
        undecided = summary.undecided,
        average_rounds = summary.average_rounds,
        "tournament finished"
    );
    Ok(summary)
}

/// Aggregates per-game results, in game order.
pub fn summarize(config: &TournamentConfig, world: &World, base_seed: u64, results: &[GameResult]) -> TournamentSummary {
    let games = results.len();
    let denominator = games.max(1) as f64;
    let records = world
        .army_ids()
        .zip(&config.strategies)
        .map(|(army, name)| {
            let wins = results.iter().filter(|r| r.winner == Some(army)).count();
            let placement_sum: usize = results.iter().map(|r| r.placements[army.index()]).sum();
            StrategyRecord {
                strategy: name.clone(),
                army: army.to_string(),
                wins,
                average_placement: placement_sum as f64 / denominator,
            }
        })
        .collect();
    TournamentSummary {
        board: config.board.clone(),
        games,
        base_seed,
        undecided: results.iter().filter(|r| r.winner.is_none()).count(),
        average_rounds: results.iter().map(|r| f64::from(r.rounds)).sum::<f64>() / denominator,
        records,
    }
}
