//! Board representation and game-state types.
//!
//! Contains the immutable world model, the occupation state layered over it,
//! the built-in boards, and initial setup.

pub mod maps;
pub mod setup;
pub mod state;
pub mod world;

pub use setup::{random_initial_state, setup_rng, INITIAL_UNITS};
pub use state::{GameState, Occupation, MIN_REINFORCEMENT};
pub use world::{
    Army, ArmyId, BoardSpec, Region, RegionId, RegionSpec, Territory, TerritoryId, World,
    ARMY_COLOURS,
};
