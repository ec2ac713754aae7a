//! Observation points emitted by the orchestrator.

use crate::board::{ArmyId, GameState};
use crate::rules::{
    AttackDecision, AttackReport, DefenseDecision, ManeuverDecision, PendingConquest, ReinforcementPlan,
};

/// Something that just happened. The state passed alongside is the state
/// after the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    TurnStarted {
        round: u32,
        army: ArmyId,
    },
    Reinforced {
        army: ArmyId,
        plan: &'a ReinforcementPlan,
    },
    AttackRound {
        attack: &'a AttackDecision,
        defense: &'a DefenseDecision,
        report: &'a AttackReport,
    },
    Invaded {
        conquest: &'a PendingConquest,
        units: u32,
    },
    Maneuvered {
        army: ArmyId,
        maneuver: Option<&'a ManeuverDecision>,
    },
    Eliminated {
        army: ArmyId,
        by: ArmyId,
    },
    RoundEnded {
        round: u32,
    },
    GameOver {
        winner: Option<ArmyId>,
        rounds: u32,
    },
}

/// Receives every event of a game. Must not influence play.
pub trait Observer {
    fn observe(&mut self, event: &Event<'_>, state: &GameState);
}

impl<F> Observer for F
where
    F: FnMut(&Event<'_>, &GameState),
{
    fn observe(&mut self, event: &Event<'_>, state: &GameState) {
        self(event, state)
    }
}
