//! Exact odds of taking a territory over a whole battle.
//!
//! Both sides are assumed to roll the most dice they can every round until
//! the defender is wiped out or the attacker has nothing left to commit.
//! Each state `(attackers, defenders)` branches through the single-round
//! probability table, so the win probability falls out of a dynamic program
//! over the (attackers x defenders) grid.

use super::resolver::{dice_counts, MAX_DEFENSE_DICE};
use super::table::{all_probability_tables, ProbabilityTable};

fn table(attack_dice: u32, defense_dice: u32) -> &'static ProbabilityTable {
    let index = (attack_dice - 1) * MAX_DEFENSE_DICE + (defense_dice - 1);
    &all_probability_tables()[index as usize]
}

/// Win probabilities for every `(attackers, defenders)` up to a bound.
///
/// `attackers` counts the units free to attack, i.e. excluding the one that
/// must stay behind on the source territory.
#[derive(Debug, Clone)]
pub struct OddsGrid {
    max_attackers: u32,
    max_defenders: u32,
    cells: Vec<f64>,
}

impl OddsGrid {
    pub fn new(max_attackers: u32, max_defenders: u32) -> Self {
        let width = max_defenders as usize + 1;
        let mut cells = vec![0.0; (max_attackers as usize + 1) * width];
        // Cells only depend on cells with fewer attackers or fewer defenders,
        // which row-major order has already filled.
        for a in 0..=max_attackers {
            for d in 0..=max_defenders {
                let p: f64 = match (a, d) {
                    (_, 0) => 1.0,
                    (0, _) => 0.0,
                    _ => {
                        let (ad, dd) = dice_counts(a, d);
                        table(ad, dd)
                            .probabilities()
                            .map(|((pa, pd), p)| {
                                p * cells[(a - pa) as usize * width + (d - pd) as usize]
                            })
                            .sum()
                    }
                };
                cells[a as usize * width + d as usize] = p;
            }
        }
        OddsGrid {
            max_attackers,
            max_defenders,
            cells,
        }
    }

    /// `None` outside the grid bounds.
    pub fn get(&self, attackers: u32, defenders: u32) -> Option<f64> {
        if attackers > self.max_attackers || defenders > self.max_defenders {
            return None;
        }
        let width = self.max_defenders as usize + 1;
        self.cells.get(attackers as usize * width + defenders as usize).copied()
    }

    pub fn max_attackers(&self) -> u32 {
        self.max_attackers
    }

    pub fn max_defenders(&self) -> u32 {
        self.max_defenders
    }
}

/// Probability that `attackers` free units eventually take a territory held
/// by `defenders` units.
pub fn battle_odds(attackers: u32, defenders: u32) -> f64 {
    OddsGrid::new(attackers, defenders)
        .get(attackers, defenders)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn trivial_edges() {
        assert_eq!(battle_odds(0, 3), 0.0);
        assert_eq!(battle_odds(5, 0), 1.0);
        assert_eq!(battle_odds(0, 0), 1.0);
    }

    #[test]
    fn small_battles_match_hand_computation() {
        assert!(close(battle_odds(1, 1), 15.0 / 36.0));
        let two_v_one = 125.0 / 216.0 + (91.0 / 216.0) * (15.0 / 36.0);
        assert!(close(battle_odds(2, 1), two_v_one));
        let three_v_one = 855.0 / 1296.0 + (441.0 / 1296.0) * two_v_one;
        assert!(close(battle_odds(3, 1), three_v_one));
    }

    #[test]
    fn odds_grow_with_attackers_and_shrink_with_defenders() {
        let grid = OddsGrid::new(12, 12);
        for a in 1..12 {
            for d in 1..12 {
                let here = grid.get(a, d).unwrap();
                assert!(grid.get(a + 1, d).unwrap() >= here - 1e-12);
                assert!(grid.get(a, d + 1).unwrap() <= here + 1e-12);
                assert!((0.0..=1.0).contains(&here));
            }
        }
        assert_eq!(grid.get(13, 1), None);
    }

    #[test]
    fn grid_agrees_with_single_queries() {
        let grid = OddsGrid::new(6, 6);
        assert!(close(grid.get(5, 3).unwrap(), battle_odds(5, 3)));
        assert!(battle_odds(10, 3) > 0.9);
    }
}
