//! Hegemon: a territorial conquest engine.
//!
//! Armies occupy the territories of a fixed board, reinforce, attack with
//! dice, invade what they conquer, and maneuver, until one army holds the
//! whole board. Automated strategies make every decision; the engine
//! validates them, resolves combat, and advances the state.
//!
//! Layout, leaves first: `board` (world model and game state), `combat`
//! (dice, round resolution, exact probabilities), `rules` (decisions,
//! checks, transitions), `strategy`, `game` (orchestrator and tournaments),
//! and `render`.

pub mod board;
pub mod combat;
pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod rules;
pub mod strategy;

pub use error::{ConfigError, GameError, IllegalDecision, ResolverError};
