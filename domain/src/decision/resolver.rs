//! Final decision resolution
//!
//! Collapses a terminal [`NegotiationState`] into one auditable
//! [`FinalDecision`]. Pure and total: even a run where nothing could be
//! extracted resolves to a valid decision.

use crate::assessment::esi::{EsiLevel, PENDING_DESCRIPTION};
use crate::negotiation::state::NegotiationState;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reported level text when neither role produced a usable level
pub const UNDETERMINED_LABEL: &str = "Unable to determine";

/// How the final level was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusKind {
    /// Doctor agreed with the nurse's level
    MutualAgreement,
    /// Doctor's level reported without agreement
    DoctorOverride,
    /// Only the nurse produced a level
    NurseOnly,
    /// No usable level from either role
    NoConsensus,
}

impl ConsensusKind {
    /// Whether the two roles actually converged
    pub fn is_consensus(&self) -> bool {
        matches!(self, ConsensusKind::MutualAgreement)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsensusKind::MutualAgreement => "Yes - Mutual Agreement",
            ConsensusKind::DoctorOverride => "No - Doctor Override",
            ConsensusKind::NurseOnly => "No - Nurse Assessment Only",
            ConsensusKind::NoConsensus => "No consensus reached",
        }
    }
}

impl std::fmt::Display for ConsensusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Reported ESI level: a number, or "Unable to determine"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalLevel {
    Determined(EsiLevel),
    Undetermined,
}

impl FinalLevel {
    pub fn level(&self) -> Option<EsiLevel> {
        match self {
            FinalLevel::Determined(level) => Some(*level),
            FinalLevel::Undetermined => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FinalLevel::Determined(level) => level.description(),
            FinalLevel::Undetermined => PENDING_DESCRIPTION,
        }
    }
}

impl std::fmt::Display for FinalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinalLevel::Determined(level) => write!(f, "{}", level),
            FinalLevel::Undetermined => write!(f, "{}", UNDETERMINED_LABEL),
        }
    }
}

impl Serialize for FinalLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FinalLevel::Determined(level) => level.serialize(serializer),
            FinalLevel::Undetermined => serializer.serialize_str(UNDETERMINED_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for FinalLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => EsiLevel::new(n)
                .map(FinalLevel::Determined)
                .map_err(serde::de::Error::custom),
            Raw::Text(s) if s == UNDETERMINED_LABEL => Ok(FinalLevel::Undetermined),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected an ESI level or \"{}\", got \"{}\"",
                UNDETERMINED_LABEL, s
            ))),
        }
    }
}

/// Outcome of one triage negotiation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub esi_level: FinalLevel,
    /// Clinical label for the level
    pub description: String,
    pub consensus_kind: ConsensusKind,
    pub nurse_reasoning: String,
    pub doctor_reasoning: String,
    /// Completed doctor turns
    pub iterations: u32,
}

/// Resolve a terminal negotiation state into the reported decision.
///
/// Priority: mutual agreement on the nurse's level, then the doctor's level,
/// then the nurse's level alone, then "Unable to determine".
pub fn resolve(state: &NegotiationState) -> FinalDecision {
    let nurse_level = state.nurse_assessment().and_then(|a| a.esi_level);
    let doctor_level = state.doctor_assessment().and_then(|a| a.esi_level);

    let (esi_level, consensus_kind) = match (state.agreement(), nurse_level, doctor_level) {
        (true, Some(nurse), _) => (FinalLevel::Determined(nurse), ConsensusKind::MutualAgreement),
        (_, _, Some(doctor)) => (FinalLevel::Determined(doctor), ConsensusKind::DoctorOverride),
        (_, Some(nurse), None) => (FinalLevel::Determined(nurse), ConsensusKind::NurseOnly),
        (_, None, None) => (FinalLevel::Undetermined, ConsensusKind::NoConsensus),
    };

    FinalDecision {
        esi_level,
        description: esi_level.description().to_string(),
        consensus_kind,
        nurse_reasoning: state
            .nurse_assessment()
            .map(|a| a.reasoning.clone())
            .unwrap_or_default(),
        doctor_reasoning: state
            .doctor_assessment()
            .map(|a| a.reasoning.clone())
            .unwrap_or_default(),
        iterations: state.iteration(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::PatientNote;

    fn run(turns: &[(&str, &str)]) -> NegotiationState {
        let mut state = NegotiationState::new(PatientNote::try_new("fever and cough").unwrap());
        for (nurse, doctor) in turns {
            state.record_nurse_turn(*nurse);
            state.record_doctor_turn(*doctor);
        }
        state
    }

    #[test]
    fn test_mutual_agreement_uses_nurse_level() {
        let state = run(&[(
            "ESI Level: 2\nReasoning: possible sepsis\nConfidence: High",
            "Agreement: Yes\nReasoning: concur",
        )]);
        let decision = resolve(&state);
        assert_eq!(decision.esi_level, FinalLevel::Determined(EsiLevel::EMERGENT));
        assert_eq!(decision.consensus_kind, ConsensusKind::MutualAgreement);
        assert_eq!(decision.description, "Emergent — High risk, don't delay");
        assert_eq!(decision.nurse_reasoning, "possible sepsis");
        assert_eq!(decision.doctor_reasoning, "concur");
        assert_eq!(decision.iterations, 1);
    }

    #[test]
    fn test_agreement_without_nurse_level_falls_to_doctor() {
        let state = run(&[("no level", "Agreement: Yes\nESI Level: 3")]);
        let decision = resolve(&state);
        assert_eq!(decision.esi_level, FinalLevel::Determined(EsiLevel::URGENT));
        assert_eq!(decision.consensus_kind, ConsensusKind::DoctorOverride);
    }

    #[test]
    fn test_doctor_override() {
        let state = run(&[("ESI Level: 4", "ESI Level: 2"), ("ESI Level: 3", "ESI Level: 2")]);
        let decision = resolve(&state);
        assert_eq!(decision.esi_level, FinalLevel::Determined(EsiLevel::EMERGENT));
        assert_eq!(decision.consensus_kind, ConsensusKind::DoctorOverride);
        assert_eq!(decision.iterations, 2);
    }

    #[test]
    fn test_nurse_only() {
        let state = run(&[("ESI Level: 5", "Agreement: No"), ("ESI Level: 5", "Agreement: No")]);
        let decision = resolve(&state);
        assert_eq!(decision.esi_level, FinalLevel::Determined(EsiLevel::NON_URGENT));
        assert_eq!(decision.consensus_kind, ConsensusKind::NurseOnly);
    }

    #[test]
    fn test_no_consensus() {
        let state = run(&[("hmm", "hmm"), ("hmm", "hmm")]);
        let decision = resolve(&state);
        assert_eq!(decision.esi_level, FinalLevel::Undetermined);
        assert_eq!(decision.consensus_kind, ConsensusKind::NoConsensus);
        assert_eq!(decision.description, PENDING_DESCRIPTION);
        assert_eq!(decision.nurse_reasoning, "Unclear");
        assert_eq!(decision.esi_level.to_string(), UNDETERMINED_LABEL);
    }

    #[test]
    fn test_resolve_before_any_turn() {
        let state = run(&[]);
        let decision = resolve(&state);
        assert_eq!(decision.consensus_kind, ConsensusKind::NoConsensus);
        assert_eq!(decision.nurse_reasoning, "");
        assert_eq!(decision.iterations, 0);
    }

    #[test]
    fn test_resolve_is_pure() {
        let state = run(&[("ESI Level: 3", "ESI Level: 4")]);
        assert_eq!(resolve(&state), resolve(&state));
    }

    #[test]
    fn test_final_level_serde() {
        let determined = FinalLevel::Determined(EsiLevel::URGENT);
        assert_eq!(serde_json::to_string(&determined).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&FinalLevel::Undetermined).unwrap(),
            "\"Unable to determine\""
        );
        let parsed: FinalLevel = serde_json::from_str("\"Unable to determine\"").unwrap();
        assert_eq!(parsed, FinalLevel::Undetermined);
        let parsed: FinalLevel = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, FinalLevel::Determined(EsiLevel::IMMEDIATE));
        assert!(serde_json::from_str::<FinalLevel>("\"soon\"").is_err());
    }

    #[test]
    fn test_consensus_kind_labels() {
        assert_eq!(ConsensusKind::MutualAgreement.to_string(), "Yes - Mutual Agreement");
        assert_eq!(ConsensusKind::NoConsensus.to_string(), "No consensus reached");
        assert!(ConsensusKind::MutualAgreement.is_consensus());
        assert!(!ConsensusKind::DoctorOverride.is_consensus());
    }
}
