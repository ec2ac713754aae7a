//! Rule enforcement: decision records, legality checks, and the four
//! state transitions.

pub mod checks;
pub mod decision;
pub mod transitions;

pub use checks::{invasion_range, CheckMode};
pub use decision::{
    AttackDecision, DefenseDecision, InvasionDecision, ManeuverDecision, PendingConquest,
    ReinforcementPlan,
};
pub use transitions::{do_attack_round, do_invade, do_maneuver, do_reinforce, AttackReport};
