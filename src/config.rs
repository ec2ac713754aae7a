//! Run configuration for single games and tournaments.
//!
//! Both configurations deserialize from JSON with every field optional;
//! missing fields take their `Default` value.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::CheckMode;

/// Round bound applied when none is configured.
pub const DEFAULT_MAX_ROUNDS: u32 = 500;

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds played before the game is declared undecided. `None` plays
    /// until someone wins.
    pub max_rounds: Option<u32>,
    /// Seed for dice and strategy draws (0 = draw one from entropy).
    pub seed: u64,
    pub checks: CheckMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
            seed: 0,
            checks: CheckMode::Checked,
        }
    }
}

impl GameConfig {
    /// The configured seed, or a fresh non-zero one when it is 0.
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            0 => rand::random::<u64>().max(1),
            seed => seed,
        }
    }
}

/// Settings for a batch of independent games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub games: usize,
    /// Built-in board name.
    pub board: String,
    /// One registry name per army, in seat order.
    pub strategies: Vec<String>,
    pub max_rounds: Option<u32>,
    /// Base seed; game `i` uses `seed + i` (0 = draw a base from entropy).
    pub seed: u64,
    /// Worker threads (0 = one per core).
    pub threads: usize,
    pub checks: CheckMode,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 100,
            board: "classic".to_string(),
            strategies: vec!["probabilistic".to_string(), "uniform".to_string(), "random".to_string()],
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
            seed: 0,
            threads: 0,
            checks: CheckMode::Checked,
        }
    }
}

impl TournamentConfig {
    /// Game configuration for game number `index`.
    pub fn game_config(&self, base_seed: u64, index: usize) -> GameConfig {
        GameConfig {
            max_rounds: self.max_rounds,
            // never 0, which would ask for entropy
            seed: base_seed.wrapping_add(index as u64).max(1),
            checks: self.checks,
        }
    }
}

/// Parses a configuration from JSON text.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::InvalidConfigFile(e.to_string()))
}

/// Reads and parses a JSON configuration file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::InvalidConfigFile(format!("{}: {e}", path.display())))?;
    from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: GameConfig = from_json(r#"{"seed": 7}"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.max_rounds, Some(DEFAULT_MAX_ROUNDS));
        assert_eq!(cfg.checks, CheckMode::Checked);

        let cfg: TournamentConfig = from_json(r#"{"games": 4, "checks": "trusted", "max_rounds": null}"#).unwrap();
        assert_eq!(cfg.games, 4);
        assert_eq!(cfg.checks, CheckMode::Trusted);
        assert_eq!(cfg.max_rounds, None);
        assert_eq!(cfg.board, "classic");
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = from_json::<GameConfig>("{seed:").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfigFile(_)));
    }

    #[test]
    fn seeds_are_offset_per_game() {
        let t = TournamentConfig::default();
        assert_eq!(t.game_config(10, 3).seed, 13);
        assert_eq!(GameConfig { seed: 5, ..Default::default() }.resolve_seed(), 5);
        assert_ne!(GameConfig::default().resolve_seed(), 0);
    }
}
