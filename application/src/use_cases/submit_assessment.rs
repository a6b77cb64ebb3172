//! Submit Assessment use case
//!
//! The caller-side duties around a negotiation: validate and screen the note,
//! run the negotiation, translate the outcome for the patient and store it.

use super::run_triage::{RunTriageError, RunTriageUseCase};
use crate::ports::assessment_repository::{AssessmentId, AssessmentRecord, AssessmentRepository};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use triage_domain::screening::matched_pattern;
use triage_domain::{DomainError, FinalDecision, PatientNote, translate};

/// Reason reported when screening rejects a note
pub const INJECTION_REJECTION: &str = "Potential prompt injection detected. Input rejected.";

/// Errors that can occur while submitting an assessment
#[derive(Error, Debug)]
pub enum SubmitAssessmentError {
    #[error("Invalid note: {0}")]
    InvalidNote(#[from] DomainError),

    #[error(transparent)]
    Triage(#[from] RunTriageError),
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Screening refused the note; no backend call was made
    Rejected { reason: String },
    /// The negotiation ran to completion
    Completed {
        decision: FinalDecision,
        patient_summary: String,
        /// `None` when storage is disabled or the save failed
        stored_id: Option<AssessmentId>,
    },
}

impl SubmissionOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmissionOutcome::Rejected { .. })
    }

    pub fn decision(&self) -> Option<&FinalDecision> {
        match self {
            SubmissionOutcome::Completed { decision, .. } => Some(decision),
            SubmissionOutcome::Rejected { .. } => None,
        }
    }
}

/// Use case for a screened, persisted triage submission
pub struct SubmitAssessmentUseCase<G: LlmGateway + ?Sized> {
    triage: RunTriageUseCase<G>,
    repository: Option<Arc<dyn AssessmentRepository>>,
}

impl<G: LlmGateway + ?Sized> SubmitAssessmentUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            triage: RunTriageUseCase::new(gateway),
            repository: None,
        }
    }

    /// Store completed assessments in `repository`
    pub fn with_repository(mut self, repository: Arc<dyn AssessmentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub async fn execute(&self, note: &str) -> Result<SubmissionOutcome, SubmitAssessmentError> {
        self.execute_with_progress(note, &NoProgress, &CancellationToken::new())
            .await
    }

    pub async fn execute_with_progress(
        &self,
        note: &str,
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<SubmissionOutcome, SubmitAssessmentError> {
        let note = PatientNote::try_new(note)?;

        if let Some(pattern) = matched_pattern(note.content()) {
            warn!(pattern, "Rejected note matching injection pattern");
            return Ok(SubmissionOutcome::Rejected {
                reason: INJECTION_REJECTION.to_string(),
            });
        }

        let decision = self
            .triage
            .execute_cancellable(note.clone(), progress, cancel)
            .await?;
        let patient_summary = translate(&decision);
        let stored_id = self.store(&note, &decision).await;

        Ok(SubmissionOutcome::Completed {
            decision,
            patient_summary,
            stored_id,
        })
    }

    /// Persist the outcome off the async worker threads.
    ///
    /// Storage is best-effort: failures are logged and yield `None`.
    async fn store(&self, note: &PatientNote, decision: &FinalDecision) -> Option<AssessmentId> {
        let repository = Arc::clone(self.repository.as_ref()?);
        let record = AssessmentRecord::new(note, decision.clone());
        let id = record.id;
        let esi_level = record.esi_level;

        match tokio::task::spawn_blocking(move || repository.save(&record)).await {
            Ok(Ok(())) => {
                info!(id = %id, esi_level, "Stored assessment");
                Some(id)
            }
            Ok(Err(e)) => {
                warn!("Failed to store assessment: {}", e);
                None
            }
            Err(e) => {
                warn!("Assessment storage task failed: {}", e);
                None
            }
        }
    }
}
