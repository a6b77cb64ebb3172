//! Run Triage use case
//!
//! Drives the nurse/doctor negotiation for one patient note and resolves it
//! into a [`FinalDecision`].
//!
//! The loop is strictly sequential: each role call is awaited before the next
//! phase is chosen. A [`Negotiation`] can also be stepped by hand, in which case
//! the host abandons a run simply by no longer calling [`Negotiation::step`].

use super::invoke_role::RoleInvoker;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use triage_domain::{
    FinalDecision, NegotiationPhase, NegotiationState, PatientNote, Role, resolve,
};

/// Errors that can occur during a triage negotiation
#[derive(Error, Debug)]
pub enum RunTriageError {
    #[error("Backend unavailable during {role} turn: {source}")]
    BackendUnavailable {
        role: Role,
        #[source]
        source: GatewayError,
    },

    #[error("Negotiation cancelled")]
    Cancelled,
}

impl RunTriageError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunTriageError::Cancelled)
    }
}

/// One in-flight negotiation: state plus the phase that runs next
pub struct Negotiation<'a, G: LlmGateway + ?Sized> {
    invoker: &'a RoleInvoker<G>,
    progress: &'a dyn ProgressNotifier,
    state: NegotiationState,
    phase: NegotiationPhase,
}

impl<'a, G: LlmGateway + ?Sized> Negotiation<'a, G> {
    fn new(invoker: &'a RoleInvoker<G>, note: PatientNote, progress: &'a dyn ProgressNotifier) -> Self {
        Self {
            invoker,
            progress,
            state: NegotiationState::new(note),
            phase: NegotiationPhase::Start,
        }
    }

    pub fn phase(&self) -> NegotiationPhase {
        self.phase
    }

    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.phase.is_done()
    }

    /// Run the current phase and advance to the next one.
    ///
    /// A role phase makes exactly one backend call; `Start` and `Done` make
    /// none. Stepping a finished negotiation is a no-op.
    pub async fn step(&mut self) -> Result<NegotiationPhase, RunTriageError> {
        if let Some(role) = self.phase.role() {
            self.take_turn(role).await?;
        }

        let next = self.phase.next(&self.state);
        debug!(from = %self.phase, to = %next, "Negotiation transition");
        self.phase = next;
        Ok(next)
    }

    /// The resolved decision, once the negotiation is done
    pub fn decision(&self) -> Option<FinalDecision> {
        self.is_done().then(|| resolve(&self.state))
    }

    /// Consume the negotiation and resolve whatever state it reached.
    pub fn finish(self) -> FinalDecision {
        resolve(&self.state)
    }

    async fn take_turn(&mut self, role: Role) -> Result<(), RunTriageError> {
        let cycle = self.state.iteration() + 1;
        self.progress.on_turn_start(role, cycle);

        let text = self
            .invoker
            .invoke(role, &self.state)
            .await
            .map_err(|source| {
                warn!(role = %role, cycle, "Backend call failed: {}", source);
                RunTriageError::BackendUnavailable { role, source }
            })?;

        match role {
            Role::Nurse => {
                let assessment = self.state.record_nurse_turn(text);
                info!(
                    cycle,
                    esi_level = ?assessment.esi_level.map(|l| l.value()),
                    confidence = %assessment.confidence,
                    "Nurse turn complete"
                );
                self.progress.on_turn_complete(role, assessment);
            }
            Role::Doctor => {
                let agreed = self.state.record_doctor_turn(text);
                if let Some(assessment) = self.state.doctor_assessment() {
                    info!(
                        cycle,
                        esi_level = ?assessment.esi_level.map(|l| l.value()),
                        agreed,
                        "Doctor turn complete"
                    );
                    self.progress.on_turn_complete(role, assessment);
                }
                self.progress.on_agreement_evaluated(agreed, cycle);
            }
        }

        Ok(())
    }
}

/// Use case for running a triage negotiation
pub struct RunTriageUseCase<G: LlmGateway + ?Sized> {
    invoker: RoleInvoker<G>,
}

impl<G: LlmGateway + ?Sized> RunTriageUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            invoker: RoleInvoker::new(gateway),
        }
    }

    /// Begin a negotiation to be driven with [`Negotiation::step`]
    pub fn start<'a>(
        &'a self,
        note: PatientNote,
        progress: &'a dyn ProgressNotifier,
    ) -> Negotiation<'a, G> {
        Negotiation::new(&self.invoker, note, progress)
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, note: PatientNote) -> Result<FinalDecision, RunTriageError> {
        self.execute_with_progress(note, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        note: PatientNote,
        progress: &dyn ProgressNotifier,
    ) -> Result<FinalDecision, RunTriageError> {
        self.execute_cancellable(note, progress, &CancellationToken::new())
            .await
    }

    /// Execute until done, abandoning the run as soon as `cancel` fires.
    ///
    /// A turn interrupted by cancellation is dropped whole; nothing of it is
    /// recorded.
    pub async fn execute_cancellable(
        &self,
        note: PatientNote,
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<FinalDecision, RunTriageError> {
        info!(note_bytes = note.content().len(), "Starting triage negotiation");
        let mut negotiation = self.start(note, progress);

        while !negotiation.is_done() {
            let phase = negotiation.phase();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(phase = %phase, "Triage negotiation cancelled");
                    return Err(RunTriageError::Cancelled);
                }
                result = negotiation.step() => {
                    result?;
                }
            }
        }

        let decision = negotiation.finish();
        info!(
            esi_level = %decision.esi_level,
            consensus = %decision.consensus_kind,
            iterations = decision.iterations,
            "Triage negotiation complete"
        );
        progress.on_negotiation_complete(&decision);
        Ok(decision)
    }
}
