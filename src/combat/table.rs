//! Exact loss distributions for a single combat round.
//!
//! Every one of the `6^(a+d)` equiprobable face tuples is enumerated and
//! scored with the same sort/compare/tie rule as the live resolver, so the
//! tables are exact counts rather than estimates. There are only six
//! `(attack, defense)` dice combinations; they are computed once and cached.

use std::sync::OnceLock;

use serde::Serialize;

use super::dice::FACES;
use super::resolver::{compare_dice, MAX_ATTACK_DICE, MAX_DEFENSE_DICE};
use crate::error::ResolverError;

/// Number of tuples yielding one `(attacker_losses, defender_losses)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LossCount {
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub count: u32,
}

/// Joint distribution of losses for one dice combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbabilityTable {
    pub attack_dice: u32,
    pub defense_dice: u32,
    /// `6^(attack_dice + defense_dice)`.
    pub total: u32,
    /// Sorted by attacker losses; outcomes with zero count are omitted.
    pub outcomes: Vec<LossCount>,
}

impl ProbabilityTable {
    /// Exact probability of a loss pair as a fraction of `total`.
    pub fn count(&self, attacker_losses: u32, defender_losses: u32) -> u32 {
        self.outcomes
            .iter()
            .find(|o| o.attacker_losses == attacker_losses && o.defender_losses == defender_losses)
            .map_or(0, |o| o.count)
    }

    pub fn probability(&self, attacker_losses: u32, defender_losses: u32) -> f64 {
        f64::from(self.count(attacker_losses, defender_losses)) / f64::from(self.total)
    }

    /// `(loss pair, probability)` for every possible outcome.
    pub fn probabilities(&self) -> impl Iterator<Item = ((u32, u32), f64)> + '_ {
        let total = f64::from(self.total);
        self.outcomes
            .iter()
            .map(move |o| ((o.attacker_losses, o.defender_losses), f64::from(o.count) / total))
    }

    /// Expected `(attacker_losses, defender_losses)`.
    pub fn expected_losses(&self) -> (f64, f64) {
        self.probabilities()
            .fold((0.0, 0.0), |(ea, ed), ((pa, pd), p)| {
                (ea + f64::from(pa) * p, ed + f64::from(pd) * p)
            })
    }
}

/// Enumerates every die-face tuple for the given dice counts.
pub fn probability_table(attack_dice: u32, defense_dice: u32) -> Result<ProbabilityTable, ResolverError> {
    if !(1..=MAX_ATTACK_DICE).contains(&attack_dice) || !(1..=MAX_DEFENSE_DICE).contains(&defense_dice) {
        return Err(ResolverError::DiceOutOfRange {
            attack: attack_dice,
            defend: defense_dice,
        });
    }

    let faces = u32::from(FACES);
    let dice = attack_dice + defense_dice;
    let total = faces.pow(dice);
    // pairs compared = min(a, d) <= 2, so losses fit in a 3x3 grid
    let mut grid = [[0u32; 3]; 3];

    let mut attack = Vec::with_capacity(attack_dice as usize);
    let mut defense = Vec::with_capacity(defense_dice as usize);
    for mut code in 0..total {
        attack.clear();
        defense.clear();
        for i in 0..dice {
            let face = (code % faces) as u8 + 1;
            code /= faces;
            if i < attack_dice {
                attack.push(face);
            } else {
                defense.push(face);
            }
        }
        attack.sort_unstable_by(|a, b| b.cmp(a));
        defense.sort_unstable_by(|a, b| b.cmp(a));
        let (pa, pd) = compare_dice(&attack, &defense);
        grid[pa as usize][pd as usize] += 1;
    }

    let outcomes = grid
        .iter()
        .enumerate()
        .flat_map(|(pa, row)| {
            row.iter().enumerate().filter(|(_, &c)| c > 0).map(move |(pd, &count)| LossCount {
                attacker_losses: pa as u32,
                defender_losses: pd as u32,
                count,
            })
        })
        .collect();

    Ok(ProbabilityTable {
        attack_dice,
        defense_dice,
        total,
        outcomes,
    })
}

/// The six tables, computed on first use.
pub fn all_probability_tables() -> &'static [ProbabilityTable] {
    static TABLES: OnceLock<Vec<ProbabilityTable>> = OnceLock::new();
    TABLES.get_or_init(|| {
        (1..=MAX_ATTACK_DICE)
            .flat_map(|a| (1..=MAX_DEFENSE_DICE).map(move |d| (a, d)))
            .filter_map(|(a, d)| probability_table(a, d).ok())
            .collect()
    })
}

/// Cached table for a dice combination.
pub fn cached_table(attack_dice: u32, defense_dice: u32) -> Result<&'static ProbabilityTable, ResolverError> {
    all_probability_tables()
        .iter()
        .find(|t| t.attack_dice == attack_dice && t.defense_dice == defense_dice)
        .ok_or(ResolverError::DiceOutOfRange {
            attack: attack_dice,
            defend: defense_dice,
        })
}
