//! Dice, single-round combat resolution, and exact combat probabilities.

pub mod dice;
pub mod odds;
pub mod resolver;
pub mod table;

pub use dice::{Dice, LoadedDice, RandomDice, FACES};
pub use odds::{battle_odds, OddsGrid};
pub use resolver::{
    compare_dice, dice_counts, resolve_round, BattleOutcome, MAX_ATTACK_DICE, MAX_DEFENSE_DICE,
};
pub use table::{all_probability_tables, cached_table, probability_table, LossCount, ProbabilityTable};
