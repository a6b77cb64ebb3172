//! Negotiation state machine
//!
//! ```text
//!   Start ──► NurseTurn ──► DoctorTurn ──► Done
//!                 ▲              │
//!                 └──────────────┘  disagreement and turns remaining
//! ```
//!
//! A phase names the step that runs next. The transition function is pure, so
//! the termination rule can be tested without any backend.

use super::state::NegotiationState;
use crate::core::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationPhase {
    Start,
    NurseTurn,
    DoctorTurn,
    Done,
}

impl NegotiationPhase {
    /// Phase that follows `self` once its step has been applied to `state`.
    pub fn next(self, state: &NegotiationState) -> Self {
        match self {
            NegotiationPhase::Start => NegotiationPhase::NurseTurn,
            NegotiationPhase::NurseTurn => NegotiationPhase::DoctorTurn,
            NegotiationPhase::DoctorTurn if state.is_terminal() => NegotiationPhase::Done,
            NegotiationPhase::DoctorTurn => NegotiationPhase::NurseTurn,
            NegotiationPhase::Done => NegotiationPhase::Done,
        }
    }

    /// Role whose turn this phase is, if any
    pub fn role(&self) -> Option<Role> {
        match self {
            NegotiationPhase::NurseTurn => Some(Role::Nurse),
            NegotiationPhase::DoctorTurn => Some(Role::Doctor),
            NegotiationPhase::Start | NegotiationPhase::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, NegotiationPhase::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationPhase::Start => "start",
            NegotiationPhase::NurseTurn => "nurse_turn",
            NegotiationPhase::DoctorTurn => "doctor_turn",
            NegotiationPhase::Done => "done",
        }
    }
}

impl std::fmt::Display for NegotiationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::PatientNote;
    use crate::negotiation::state::MAX_DOCTOR_TURNS;

    fn state() -> NegotiationState {
        NegotiationState::new(PatientNote::try_new("ankle pain after a fall").unwrap())
    }

    #[test]
    fn test_unconditional_transitions() {
        let s = state();
        assert_eq!(NegotiationPhase::Start.next(&s), NegotiationPhase::NurseTurn);
        assert_eq!(NegotiationPhase::NurseTurn.next(&s), NegotiationPhase::DoctorTurn);
        assert_eq!(NegotiationPhase::Done.next(&s), NegotiationPhase::Done);
    }

    #[test]
    fn test_doctor_turn_loops_on_disagreement() {
        let mut s = state();
        s.record_nurse_turn("ESI Level: 4");
        s.record_doctor_turn("ESI Level: 3");
        assert_eq!(NegotiationPhase::DoctorTurn.next(&s), NegotiationPhase::NurseTurn);
    }

    #[test]
    fn test_doctor_turn_stops_on_agreement() {
        let mut s = state();
        s.record_nurse_turn("ESI Level: 4");
        s.record_doctor_turn("Agreement: Yes");
        assert_eq!(NegotiationPhase::DoctorTurn.next(&s), NegotiationPhase::Done);
    }

    #[test]
    fn test_doctor_turn_stops_at_bound() {
        let mut s = state();
        let mut phase = NegotiationPhase::Start;
        let mut doctor_turns = 0;
        while !phase.is_done() {
            match phase.role() {
                Some(Role::Nurse) => {
                    s.record_nurse_turn("ESI Level: 4");
                }
                Some(Role::Doctor) => {
                    s.record_doctor_turn("Agreement: No");
                    doctor_turns += 1;
                }
                None => {}
            }
            phase = phase.next(&s);
        }
        assert_eq!(doctor_turns, MAX_DOCTOR_TURNS);
        assert_eq!(s.iteration(), MAX_DOCTOR_TURNS);
    }

    #[test]
    fn test_phase_roles() {
        assert_eq!(NegotiationPhase::NurseTurn.role(), Some(Role::Nurse));
        assert_eq!(NegotiationPhase::DoctorTurn.role(), Some(Role::Doctor));
        assert_eq!(NegotiationPhase::Start.role(), None);
        assert_eq!(NegotiationPhase::Done.role(), None);
    }
}
