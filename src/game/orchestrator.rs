//! Turn orchestration.
//!
//! `Game` is a state machine over the phases of one army's turn:
//! reinforce, attack, maneuver, end of turn. Armies act in a fixed cyclic
//! order; an army that loses its last territory leaves the order at the end
//! of the turn in which it fell. The game ends when one army holds every
//! territory or when the round bound is reached, which is reported as an
//! undecided outcome rather than an error.
//!
//! Every decision is validated as soon as the strategy returns it, before
//! the matching transition runs.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::observer::{Event, Observer};
use crate::board::{ArmyId, GameState};
use crate::combat::{Dice, RandomDice};
use crate::config::GameConfig;
use crate::error::{ConfigError, GameError, IllegalDecision};
use crate::rules::checks::{check_attack, check_defense, check_invasion, check_maneuver, check_reinforcement};
use crate::rules::{
    do_attack_round, do_invade, do_maneuver, do_reinforce, invasion_range, CheckMode, PendingConquest,
};
use crate::strategy::Strategy;

/// Phase of the current army's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Reinforce,
    Attack,
    Maneuver,
    EndOfTurn,
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    /// `None` when the round bound was reached first.
    pub winner: Option<ArmyId>,
    /// Rounds started, including the one in which the game was won.
    pub rounds: u32,
    pub seed: u64,
    /// Best first: survivors by territories then units, then the
    /// eliminated armies, last to fall first.
    pub standings: Vec<ArmyId>,
    pub state: GameState,
}

impl GameOutcome {
    pub fn is_undecided(&self) -> bool {
        self.winner.is_none()
    }

    /// 1-based placement of an army.
    pub fn placement(&self, army: ArmyId) -> Option<usize> {
        self.standings.iter().position(|&a| a == army).map(|p| p + 1)
    }
}

/// One game in progress.
pub struct Game<D: Dice = RandomDice<SmallRng>> {
    state: GameState,
    /// Indexed by `ArmyId::index()`.
    strategies: Vec<Box<dyn Strategy>>,
    /// Armies still in play, in turn order.
    order: Vec<ArmyId>,
    current: usize,
    phase: Phase,
    /// Completed rounds.
    round: u32,
    eliminated: Vec<ArmyId>,
    dice: D,
    rng: SmallRng,
    seed: u64,
    max_rounds: Option<u32>,
    checks: CheckMode,
    observer: Option<Box<dyn Observer>>,
    started: bool,
    finished: Option<(Option<ArmyId>, u32)>,
}

impl Game<RandomDice<SmallRng>> {
    /// A game with seeded dice. Dice and strategies draw from separate
    /// streams derived from the same seed.
    pub fn new(
        state: GameState,
        strategies: Vec<Box<dyn Strategy>>,
        config: &GameConfig,
    ) -> Result<Self, ConfigError> {
        let seed = config.resolve_seed();
        Game::build(state, strategies, RandomDice::seeded(seed), seed, config)
    }
}

impl<D: Dice> Game<D> {
    /// A game rolling the given dice.
    pub fn with_dice(
        state: GameState,
        strategies: Vec<Box<dyn Strategy>>,
        dice: D,
        config: &GameConfig,
    ) -> Result<Self, ConfigError> {
        let seed = config.resolve_seed();
        Game::build(state, strategies, dice, seed, config)
    }

    fn build(
        state: GameState,
        strategies: Vec<Box<dyn Strategy>>,
        dice: D,
        seed: u64,
        config: &GameConfig,
    ) -> Result<Self, ConfigError> {
        let armies = state.world().army_count();
        if strategies.len() != armies {
            return Err(ConfigError::StrategyCountMismatch {
                strategies: strategies.len(),
                armies,
            });
        }
        let order = state.undefeated_armies();
        let eliminated = state.world().army_ids().filter(|&a| state.is_defeated(a)).collect();
        Ok(Game {
            state,
            strategies,
            order,
            current: 0,
            phase: Phase::Reinforce,
            round: 0,
            eliminated,
            dice,
            rng: SmallRng::seed_from_u64(seed.wrapping_add(1)),
            seed,
            max_rounds: config.max_rounds,
            checks: config.checks,
            observer: None,
            started: false,
            finished: None,
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Overrides the seat order. Must list every army exactly once and be
    /// set before the first step.
    pub fn with_turn_order(mut self, order: &[ArmyId]) -> Result<Self, ConfigError> {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let all: Vec<ArmyId> = self.state.world().army_ids().collect();
        if sorted != all || order.len() != all.len() {
            return Err(ConfigError::InvalidTurnOrder);
        }
        self.order = order.iter().copied().filter(|&a| !self.state.is_defeated(a)).collect();
        Ok(self)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Armies still in play, in turn order.
    pub fn turn_order(&self) -> &[ArmyId] {
        &self.order
    }

    /// The army whose turn it is.
    pub fn current_army(&self) -> Option<ArmyId> {
        self.order.get(self.current).copied()
    }

    pub fn is_over(&self) -> bool {
        self.finished.is_some()
    }

    /// Plays the game to the end.
    pub fn run(mut self) -> Result<GameOutcome, GameError> {
        while !self.step()? {}
        Ok(self.into_outcome())
    }

    /// Advances by one phase. Returns `true` once the game is over.
    pub fn step(&mut self) -> Result<bool, GameError> {
        if self.finished.is_some() {
            return Ok(true);
        }
        if !self.started {
            self.started = true;
            // a board already won, or a zero round bound, ends before any turn
            if let Some(winner) = self.state.winner() {
                return Ok(self.finish(Some(winner), 0));
            }
            if self.max_rounds == Some(0) {
                return Ok(self.finish(None, 0));
            }
        }
        let Some(army) = self.current_army() else {
            return Ok(self.finish(None, self.round));
        };
        match self.phase {
            Phase::Reinforce => {
                self.reinforce(army)?;
                self.phase = Phase::Attack;
            }
            Phase::Attack => {
                self.attack(army)?;
                self.phase = if self.state.is_game_over() {
                    Phase::EndOfTurn
                } else {
                    Phase::Maneuver
                };
            }
            Phase::Maneuver => {
                self.maneuver(army)?;
                self.phase = Phase::EndOfTurn;
            }
            Phase::EndOfTurn => {
                self.phase = Phase::Reinforce;
                return Ok(self.end_turn(army));
            }
        }
        Ok(false)
    }

    fn emit(&mut self, event: Event<'_>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.observe(&event, &self.state);
        }
    }

    fn reinforce(&mut self, army: ArmyId) -> Result<(), GameError> {
        debug!(round = self.round + 1, army = %army, "turn");
        self.emit(Event::TurnStarted {
            round: self.round + 1,
            army,
        });
        let owed = self.state.reinforcement_owed(army);
        let plan = self.strategies[army.index()].reinforce(&self.state, army, owed, &mut self.rng);
        check_reinforcement(&self.state, army, &plan)?;
        do_reinforce(&mut self.state, army, &plan, self.checks)?;
        self.emit(Event::Reinforced { army, plan: &plan });
        Ok(())
    }

    /// Attack rounds until the strategy stops or the board is taken.
    fn attack(&mut self, army: ArmyId) -> Result<(), GameError> {
        while let Some(attack) = self.strategies[army.index()].attack(&self.state, army, &mut self.rng) {
            check_attack(&self.state, army, &attack)?;
            let defender = self
                .state
                .occupant(attack.to)
                .ok_or(IllegalDecision::NotAdjacent(attack.from, attack.to))?;
            let defense =
                self.strategies[defender.index()].defend(&self.state, attack.to, army, attack.units, &mut self.rng);
            check_defense(&self.state, attack.to, &defense)?;

            let report = do_attack_round(&mut self.state, &attack, &defense, &mut self.dice, self.checks)?;
            self.emit(Event::AttackRound {
                attack: &attack,
                defense: &defense,
                report: &report,
            });

            if let Some(conquest) = report.conquest {
                self.invade(army, &conquest)?;
                if self.state.is_defeated(defender) {
                    info!(army = %defender, by = %army, round = self.round + 1, "army eliminated");
                    self.eliminated.push(defender);
                    self.emit(Event::Eliminated { army: defender, by: army });
                }
                if self.state.is_game_over() {
                    break;
                }
            }
        }
        Ok(())
    }

    fn invade(&mut self, army: ArmyId, conquest: &PendingConquest) -> Result<(), GameError> {
        let range = invasion_range(&self.state, conquest);
        let invasion = self.strategies[army.index()].invade(&self.state, conquest, range, &mut self.rng);
        check_invasion(&self.state, conquest, &invasion)?;
        do_invade(&mut self.state, conquest, &invasion, self.checks)?;
        self.emit(Event::Invaded {
            conquest,
            units: invasion.units,
        });
        Ok(())
    }

    fn maneuver(&mut self, army: ArmyId) -> Result<(), GameError> {
        let maneuver = self.strategies[army.index()].maneuver(&self.state, army, &mut self.rng);
        if let Some(m) = &maneuver {
            check_maneuver(&self.state, army, m)?;
        }
        do_maneuver(&mut self.state, army, maneuver.as_ref(), self.checks)?;
        self.emit(Event::Maneuvered {
            army,
            maneuver: maneuver.as_ref(),
        });
        Ok(())
    }

    /// Drops eliminated armies, checks for victory and the round bound, and
    /// hands over to the next army.
    fn end_turn(&mut self, army: ArmyId) -> bool {
        let state = &self.state;
        self.order.retain(|&a| !state.is_defeated(a));

        if let Some(winner) = self.state.winner() {
            return self.finish(Some(winner), self.round + 1);
        }

        // The acting army cannot lose territory during its own turn.
        let position = self.order.iter().position(|&a| a == army).unwrap_or(0);
        self.current = position + 1;
        if self.current >= self.order.len() {
            self.current = 0;
            self.round += 1;
            self.emit(Event::RoundEnded { round: self.round });
            if self.max_rounds.is_some_and(|max| self.round >= max) {
                return self.finish(None, self.round);
            }
        }
        false
    }

    /// Records the end of the game. `rounds` counts the round in which a
    /// winner emerged.
    fn finish(&mut self, winner: Option<ArmyId>, rounds: u32) -> bool {
        match winner {
            Some(w) => info!(winner = %w, rounds, seed = self.seed, "game won"),
            None => warn!(rounds, seed = self.seed, "round bound reached without a winner"),
        }
        self.finished = Some((winner, rounds));
        self.emit(Event::GameOver { winner, rounds });
        true
    }

    fn standings(&self) -> Vec<ArmyId> {
        let mut survivors = self.state.undefeated_armies();
        survivors.sort_by_key(|&a| {
            (
                std::cmp::Reverse(self.state.territory_count_of(a)),
                std::cmp::Reverse(self.state.army_units(a)),
                a,
            )
        });
        survivors.extend(self.eliminated.iter().rev());
        survivors
    }

    fn into_outcome(self) -> GameOutcome {
        let (winner, rounds) = self.finished.unwrap_or((None, self.round));
        GameOutcome {
            winner,
            rounds,
            seed: self.seed,
            standings: self.standings(),
            state: self.state,
        }
    }
}
