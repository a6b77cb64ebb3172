//! Mutable state threaded through one nurse/doctor negotiation

use crate::assessment::agreement::agrees;
use crate::assessment::extraction::{StructuredAssessment, extract};
use crate::core::note::PatientNote;

/// Upper bound on completed doctor turns per negotiation
pub const MAX_DOCTOR_TURNS: u32 = 2;

/// State of a single negotiation run
///
/// Owned by one orchestrator for the lifetime of one run. Turns are recorded
/// through [`record_nurse_turn`](Self::record_nurse_turn) and
/// [`record_doctor_turn`](Self::record_doctor_turn), which keep the derived
/// fields (assessments, agreement, iteration) consistent with the raw text.
#[derive(Debug)]
pub struct NegotiationState {
    note: PatientNote,
    nurse_text: Option<String>,
    doctor_text: Option<String>,
    nurse_assessment: Option<StructuredAssessment>,
    doctor_assessment: Option<StructuredAssessment>,
    agreement: bool,
    iteration: u32,
}

impl NegotiationState {
    pub fn new(note: PatientNote) -> Self {
        Self {
            note,
            nurse_text: None,
            doctor_text: None,
            nurse_assessment: None,
            doctor_assessment: None,
            agreement: false,
            iteration: 0,
        }
    }

    pub fn note(&self) -> &PatientNote {
        &self.note
    }

    pub fn nurse_text(&self) -> Option<&str> {
        self.nurse_text.as_deref()
    }

    pub fn doctor_text(&self) -> Option<&str> {
        self.doctor_text.as_deref()
    }

    pub fn nurse_assessment(&self) -> Option<&StructuredAssessment> {
        self.nurse_assessment.as_ref()
    }

    pub fn doctor_assessment(&self) -> Option<&StructuredAssessment> {
        self.doctor_assessment.as_ref()
    }

    pub fn agreement(&self) -> bool {
        self.agreement
    }

    /// Number of completed doctor turns
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Whether no further turns should run
    pub fn is_terminal(&self) -> bool {
        self.agreement || self.iteration >= MAX_DOCTOR_TURNS
    }

    /// Store the nurse's response and its extracted assessment.
    pub fn record_nurse_turn(&mut self, text: impl Into<String>) -> &StructuredAssessment {
        let text = text.into();
        let assessment = extract(&text);
        self.nurse_text = Some(text);
        self.nurse_assessment.insert(assessment)
    }

    /// Store the doctor's response, re-evaluate agreement and count the turn.
    ///
    /// Returns the agreement verdict for this cycle.
    pub fn record_doctor_turn(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.agreement = agrees(self.nurse_text.as_deref().unwrap_or_default(), &text);
        self.doctor_assessment = Some(extract(&text));
        self.doctor_text = Some(text);
        self.iteration += 1;
        self.agreement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::esi::EsiLevel;

    fn state() -> NegotiationState {
        NegotiationState::new(PatientNote::try_new("sore throat for two days").unwrap())
    }

    #[test]
    fn test_new_state_defaults() {
        let s = state();
        assert_eq!(s.note().content(), "sore throat for two days");
        assert!(s.nurse_text().is_none());
        assert!(s.doctor_text().is_none());
        assert!(!s.agreement());
        assert_eq!(s.iteration(), 0);
        assert!(!s.is_terminal());
    }

    #[test]
    fn test_nurse_turn_extracts_assessment() {
        let mut s = state();
        let a = s.record_nurse_turn("ESI Level: 5\nConfidence: High");
        assert_eq!(a.esi_level, Some(EsiLevel::NON_URGENT));
        assert_eq!(s.nurse_text(), Some("ESI Level: 5\nConfidence: High"));
        assert_eq!(s.iteration(), 0);
    }

    #[test]
    fn test_doctor_turn_sets_agreement_and_iteration() {
        let mut s = state();
        s.record_nurse_turn("ESI Level: 5");
        assert!(s.record_doctor_turn("ESI Level: 5"));
        assert!(s.agreement());
        assert_eq!(s.iteration(), 1);
        assert!(s.is_terminal());
        assert_eq!(
            s.doctor_assessment().and_then(|a| a.esi_level),
            Some(EsiLevel::NON_URGENT)
        );
    }

    #[test]
    fn test_agreement_is_reevaluated_each_cycle() {
        let mut s = state();
        s.record_nurse_turn("ESI Level: 4");
        assert!(s.record_doctor_turn("Agreement: Yes"));
        s.record_nurse_turn("ESI Level: 4");
        assert!(!s.record_doctor_turn("Agreement: No"));
        assert!(!s.agreement());
        assert_eq!(s.iteration(), 2);
    }

    #[test]
    fn test_terminal_after_max_doctor_turns() {
        let mut s = state();
        for _ in 0..MAX_DOCTOR_TURNS {
            s.record_nurse_turn("ESI Level: 3");
            s.record_doctor_turn("ESI Level: 2");
        }
        assert!(!s.agreement());
        assert!(s.is_terminal());
    }

    #[test]
    fn test_later_turn_overwrites_own_role_only() {
        let mut s = state();
        s.record_nurse_turn("first nurse");
        s.record_doctor_turn("first doctor");
        s.record_nurse_turn("second nurse");
        assert_eq!(s.nurse_text(), Some("second nurse"));
        assert_eq!(s.doctor_text(), Some("first doctor"));
    }
}
