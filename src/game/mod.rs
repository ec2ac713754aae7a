//! Playing games: the turn orchestrator, its observer hook, and parallel
//! tournaments.

pub mod observer;
pub mod orchestrator;
pub mod tournament;

pub use observer::{Event, Observer};
pub use orchestrator::{Game, GameOutcome, Phase};
pub use tournament::{run_tournament, GameResult, StrategyRecord, TournamentSummary};
