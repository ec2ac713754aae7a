//! Single-round combat resolution.
//!
//! The attacker rolls one die per committed unit up to three, the defender
//! one per committed unit up to two. Both hands are sorted highest first and
//! compared pairwise; the lower die of each pair costs its side one unit and
//! a tie goes to the defender. Unpaired dice are ignored.

use serde::Serialize;

use super::dice::Dice;
use crate::error::{GameError, IllegalDecision, ResolverError};

/// Most dice an attacker may roll in one round.
pub const MAX_ATTACK_DICE: u32 = 3;

/// Most dice a defender may roll in one round.
pub const MAX_DEFENSE_DICE: u32 = 2;

/// Result of one combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BattleOutcome {
    pub attack_dice: u32,
    pub defense_dice: u32,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    /// Units left on the attacking territory.
    pub attacker_remaining: u32,
    /// Units left on the defending territory.
    pub defender_remaining: u32,
    /// The defending territory was emptied.
    pub conquered: bool,
}

/// Dice rolled for the given committed unit counts.
pub fn dice_counts(committed_attack: u32, committed_defense: u32) -> (u32, u32) {
    (
        committed_attack.min(MAX_ATTACK_DICE),
        committed_defense.min(MAX_DEFENSE_DICE),
    )
}

/// Compares two hands already sorted highest first and returns
/// `(attacker_losses, defender_losses)`.
pub fn compare_dice(attack: &[u8], defense: &[u8]) -> (u32, u32) {
    attack
        .iter()
        .zip(defense)
        .fold((0, 0), |(pa, pd), (a, d)| if a > d { (pa, pd + 1) } else { (pa + 1, pd) })
}

/// Resolves one round of battle.
///
/// `attacker_units`/`defender_units` are the units on each territory;
/// `committed_attack`/`committed_defense` are the units each side engages.
/// The attacker must keep one unit behind; the defender may engage all.
pub fn resolve_round(
    attacker_units: u32,
    defender_units: u32,
    committed_attack: u32,
    committed_defense: u32,
    dice: &mut dyn Dice,
) -> Result<BattleOutcome, GameError> {
    if attacker_units == 0 || defender_units == 0 {
        return Err(ResolverError::NonPositiveUnits {
            attacker: attacker_units,
            defender: defender_units,
        }
        .into());
    }
    if committed_attack == 0 || committed_defense == 0 {
        return Err(ResolverError::DiceOutOfRange {
            attack: committed_attack,
            defend: committed_defense,
        }
        .into());
    }
    if committed_attack >= attacker_units {
        return Err(IllegalDecision::AttackerOverCommitted {
            committed: committed_attack,
            available: attacker_units,
        }
        .into());
    }
    if committed_defense > defender_units {
        return Err(IllegalDecision::DefenderOverCommitted {
            committed: committed_defense,
            available: defender_units,
        }
        .into());
    }

    let (attack_dice, defense_dice) = dice_counts(committed_attack, committed_defense);
    let attack = dice.roll_sorted(attack_dice);
    let defense = dice.roll_sorted(defense_dice);
    let (attacker_losses, defender_losses) = compare_dice(&attack, &defense);

    let defender_remaining = defender_units - defender_losses;
    Ok(BattleOutcome {
        attack_dice,
        defense_dice,
        attacker_losses,
        defender_losses,
        attacker_remaining: attacker_units - attacker_losses,
        defender_remaining,
        conquered: defender_remaining == 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::{LoadedDice, RandomDice};

    #[test]
    fn ties_favour_the_defender() {
        assert_eq!(compare_dice(&[4], &[4]), (1, 0));
        assert_eq!(compare_dice(&[6, 5, 3], &[6, 2]), (1, 1));
        assert_eq!(compare_dice(&[6, 6], &[5, 5]), (0, 2));
        assert_eq!(compare_dice(&[2, 1, 1], &[6]), (1, 0));
    }

    #[test]
    fn three_against_two_split_losses() {
        let mut dice = LoadedDice::new(&[6, 5, 3, 6, 2]).unwrap();
        let outcome = resolve_round(4, 2, 3, 2, &mut dice).unwrap();
        assert_eq!(outcome.attack_dice, 3);
        assert_eq!(outcome.defense_dice, 2);
        assert_eq!(outcome.attacker_losses, 1);
        assert_eq!(outcome.defender_losses, 1);
        assert_eq!(outcome.attacker_remaining, 3);
        assert_eq!(outcome.defender_remaining, 1);
        assert!(!outcome.conquered);
    }

    #[test]
    fn single_die_tie_loses_for_attacker() {
        let mut dice = LoadedDice::new(&[4, 4]).unwrap();
        let outcome = resolve_round(2, 1, 1, 1, &mut dice).unwrap();
        assert_eq!((outcome.attacker_losses, outcome.defender_losses), (1, 0));
        assert_eq!(outcome.attacker_remaining, 1);
    }

    #[test]
    fn emptying_the_defender_is_a_conquest() {
        let mut dice = LoadedDice::new(&[5, 3]).unwrap();
        let outcome = resolve_round(2, 1, 1, 1, &mut dice).unwrap();
        assert!(outcome.conquered);
        assert_eq!(outcome.defender_remaining, 0);
    }

    #[test]
    fn committed_counts_above_dice_limits_are_clamped() {
        let mut dice = LoadedDice::new(&[1]).unwrap();
        let outcome = resolve_round(10, 5, 7, 4, &mut dice).unwrap();
        assert_eq!((outcome.attack_dice, outcome.defense_dice), (3, 2));
        // all ones: both pairs tie
        assert_eq!((outcome.attacker_losses, outcome.defender_losses), (2, 0));
    }

    #[test]
    fn rejects_illegal_inputs() {
        let mut dice = RandomDice::seeded(1);
        assert!(matches!(
            resolve_round(2, 1, 2, 1, &mut dice),
            Err(GameError::Illegal(IllegalDecision::AttackerOverCommitted { committed: 2, available: 2 }))
        ));
        assert!(matches!(
            resolve_round(3, 1, 1, 2, &mut dice),
            Err(GameError::Illegal(IllegalDecision::DefenderOverCommitted { .. }))
        ));
        assert!(matches!(
            resolve_round(0, 1, 1, 1, &mut dice),
            Err(GameError::Resolver(ResolverError::NonPositiveUnits { .. }))
        ));
        assert!(matches!(
            resolve_round(3, 1, 0, 1, &mut dice),
            Err(GameError::Resolver(ResolverError::DiceOutOfRange { .. }))
        ));
    }
}
