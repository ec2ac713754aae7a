//! Property tests over randomly dealt boards and dice.

use std::sync::Arc;

use proptest::prelude::*;

use hegemon::board::{maps, random_initial_state, setup_rng, ArmyId, GameState, World};
use hegemon::combat::{compare_dice, resolve_round, RandomDice};
use hegemon::config::GameConfig;
use hegemon::game::Game;
use hegemon::rules::{
    do_attack_round, do_invade, do_maneuver, do_reinforce, invasion_range, AttackDecision, CheckMode,
    DefenseDecision, InvasionDecision, ManeuverDecision, ReinforcementPlan,
};
use hegemon::strategy::{strategy_by_name, Strategy as Player};
use hegemon::{GameError, IllegalDecision};

fn dealt(seed: u64, armies: usize) -> GameState {
    let world = Arc::new(World::from_spec(&maps::classic(), armies).unwrap());
    random_initial_state(world, &mut setup_rng(seed)).unwrap()
}

/// A dealt board with a few units stacked on every territory, so attacks
/// and maneuvers are available.
fn built_up(seed: u64, armies: usize) -> GameState {
    let state = dealt(seed, armies);
    let assignments: Vec<_> = state
        .world()
        .territory_ids()
        .filter_map(|t| state.get(t).map(|o| (t, o.army, 3 + u32::from(t.0 % 4))))
        .collect();
    GameState::from_assignments(state.world_handle(), &assignments).unwrap()
}

fn hand(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=6, 1..=max).prop_map(|mut v| {
        v.sort_unstable_by(|a, b| b.cmp(a));
        v
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reinforcement_adds_exactly_what_is_owed(seed in any::<u64>(), armies in 2usize..=6) {
        let mut state = dealt(seed, armies);
        for army in state.world().army_ids().collect::<Vec<_>>() {
            let held = state.territory_count_of(army) as u32;
            let bonus: u32 = state
                .regions_of(army)
                .iter()
                .map(|&r| state.world().region(r).unwrap().bonus)
                .sum();
            let owed = state.reinforcement_owed(army);
            prop_assert_eq!(owed, (held / 3).max(3) + bonus);

            let before = state.army_units(army);
            let owned = state.territories_of(army);
            let plan: ReinforcementPlan = (0..owed).map(|i| (owned[i as usize % owned.len()], 1)).collect();
            do_reinforce(&mut state, army, &plan, CheckMode::Checked).unwrap();
            prop_assert_eq!(state.army_units(army), before + owed);
        }
    }

    #[test]
    fn maneuvers_conserve_units(seed in any::<u64>(), pick in any::<prop::sample::Index>(), share in 0.0f64..1.0) {
        let mut state = built_up(seed, 3);
        let army = ArmyId(0);
        let options = state.maneuver_options(army);
        prop_assume!(!options.is_empty());
        let (from, to, max) = options[pick.index(options.len())];
        let units = 1 + ((max - 1) as f64 * share) as u32;
        let before = state.army_units(army);
        do_maneuver(&mut state, army, Some(&ManeuverDecision { from, to, units }), CheckMode::Checked).unwrap();
        prop_assert_eq!(state.army_units(army), before);
        prop_assert!(state.units(from) >= 1);
        prop_assert!(state.vacated().is_empty());
    }

    #[test]
    fn attacking_with_every_unit_is_always_rejected(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let mut state = built_up(seed, 2);
        let options = state.attack_options(ArmyId(0));
        prop_assume!(!options.is_empty());
        let (from, to, _) = options[pick.index(options.len())];
        let before = state.clone();
        let mut dice = RandomDice::seeded(seed);
        let err = do_attack_round(
            &mut state,
            &AttackDecision { from, to, units: before.units(from) },
            &DefenseDecision { units: 1 },
            &mut dice,
            CheckMode::Checked,
        )
        .unwrap_err();
        let is_too_large = matches!(err, GameError::Illegal(IllegalDecision::AttackTooLarge { .. }));
        prop_assert!(is_too_large);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn invasion_lands_inside_its_range(seed in any::<u64>(), share in 0.0f64..1.0) {
        let mut state = built_up(seed, 2);
        let mut dice = RandomDice::seeded(seed);
        let army = ArmyId(0);
        // attack with everything until something falls or nothing is left
        let conquest = loop {
            let Some(&(from, to, max)) = state.attack_options(army).first() else { break None };
            let defense = DefenseDecision { units: state.units(to) };
            let report = do_attack_round(&mut state, &AttackDecision { from, to, units: max }, &defense, &mut dice, CheckMode::Checked).unwrap();
            if let Some(c) = report.conquest {
                break Some(c);
            }
        };
        prop_assume!(conquest.is_some());
        let conquest = conquest.unwrap();
        let range = invasion_range(&state, &conquest);
        prop_assert!(!range.is_empty());
        let source_before = state.units(conquest.from);

        let too_many = InvasionDecision { units: source_before };
        prop_assert!(do_invade(&mut state.clone(), &conquest, &too_many, CheckMode::Checked).is_err());

        let span = range.end() - range.start();
        let units = range.start() + (f64::from(span) * share) as u32;
        do_invade(&mut state, &conquest, &InvasionDecision { units }, CheckMode::Checked).unwrap();
        prop_assert_eq!(state.occupant(conquest.to), Some(army));
        prop_assert!(state.units(conquest.to) >= 1);
        prop_assert!(state.units(conquest.to) <= source_before - 1);
        prop_assert!(state.vacated().is_empty());
    }

    #[test]
    fn ties_never_cost_the_defender(attack in hand(3), defense in hand(2)) {
        let (pa, pd) = compare_dice(&attack, &defense);
        let pairs = attack.len().min(defense.len());
        prop_assert_eq!((pa + pd) as usize, pairs);
        let ties = attack.iter().zip(&defense).filter(|(a, d)| a == d).count() as u32;
        let wins = attack.iter().zip(&defense).filter(|(a, d)| a > d).count() as u32;
        prop_assert_eq!(pd, wins);
        prop_assert!(pa >= ties);
    }

    #[test]
    fn round_losses_match_dice_pairs(seed in any::<u64>(), a in 2u32..20, d in 1u32..20, n in 1u32..5, m in 1u32..3) {
        prop_assume!(n < a && m <= d);
        let outcome = resolve_round(a, d, n, m, &mut RandomDice::seeded(seed)).unwrap();
        prop_assert_eq!(outcome.attacker_losses + outcome.defender_losses, n.min(3).min(m.min(2)));
        prop_assert!(outcome.attacker_remaining >= 1);
        prop_assert_eq!(outcome.conquered, outcome.defender_remaining == 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn games_replay_from_their_seed(seed in 1u64..u64::MAX) {
        let run = || {
            let world = Arc::new(World::from_spec(&maps::polytech(), 3).unwrap());
            let state = random_initial_state(world, &mut setup_rng(seed)).unwrap();
            let strategies: Vec<Box<dyn Player>> = ["random", "uniform", "probabilistic"]
                .iter()
                .map(|n| strategy_by_name(n).unwrap())
                .collect();
            let config = GameConfig { max_rounds: Some(15), seed, checks: CheckMode::Checked };
            Game::new(state, strategies, &config).unwrap().run().unwrap()
        };
        prop_assert_eq!(run(), run());
    }
}
