//! Assessment repository port
//!
//! Persistence of completed triage decisions for audit. The negotiation
//! itself never touches storage; callers save the record after a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use triage_domain::{FinalDecision, PatientNote, extract_level};
use uuid::Uuid;

/// Errors from an assessment store
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Identifier of a stored assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(Uuid);

impl AssessmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AssessmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A stored triage outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    /// The screened note the negotiation ran on
    pub note: String,
    /// Integer level for consumers of the legacy schema; 3 when undetermined
    pub esi_level: u32,
    pub decision: FinalDecision,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn new(note: &PatientNote, decision: FinalDecision) -> Self {
        Self {
            id: AssessmentId::new(),
            note: note.content().to_string(),
            esi_level: extract_level(&decision.esi_level.to_string()),
            decision,
            created_at: Utc::now(),
        }
    }
}

/// Store for completed assessments
pub trait AssessmentRepository: Send + Sync {
    /// Persist a record
    fn save(&self, record: &AssessmentRecord) -> Result<(), RepositoryError>;

    /// Look up a record by id
    fn find(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;

    /// All records, newest first
    fn list(&self) -> Result<Vec<AssessmentRecord>, RepositoryError>;

    /// Remove every record, returning how many were removed
    fn clear(&self) -> Result<usize, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::{ConsensusKind, EsiLevel, FinalLevel};

    fn decision(esi_level: FinalLevel) -> FinalDecision {
        FinalDecision {
            esi_level,
            description: esi_level.description().to_string(),
            consensus_kind: ConsensusKind::DoctorOverride,
            nurse_reasoning: "n".to_string(),
            doctor_reasoning: "d".to_string(),
            iterations: 2,
        }
    }

    #[test]
    fn test_record_legacy_level() {
        let note = PatientNote::try_new("wrist pain").unwrap();
        let record = AssessmentRecord::new(&note, decision(FinalLevel::Determined(EsiLevel::LESS_URGENT)));
        assert_eq!(record.esi_level, 4);
        assert_eq!(record.note, "wrist pain");
    }

    #[test]
    fn test_record_undetermined_stored_as_indeterminate() {
        let note = PatientNote::try_new("unclear complaint").unwrap();
        let record = AssessmentRecord::new(&note, decision(FinalLevel::Undetermined));
        assert_eq!(record.esi_level, triage_domain::INDETERMINATE_LEVEL);
    }

    #[test]
    fn test_assessment_id_roundtrip() {
        let id = AssessmentId::new();
        let parsed: AssessmentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<AssessmentId>().is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let note = PatientNote::try_new("cough").unwrap();
        let record = AssessmentRecord::new(&note, decision(FinalLevel::Undetermined));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["esi_level"], 3);
        assert_eq!(value["decision"]["esi_level"], "Unable to determine");
        assert_eq!(value["decision"]["consensus_kind"], "doctor_override");
        assert!(value["id"].is_string());
    }
}
