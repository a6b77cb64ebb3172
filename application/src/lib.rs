//! Application layer for triage-consensus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    assessment_repository::{AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::invoke_role::RoleInvoker;
pub use use_cases::run_triage::{Negotiation, RunTriageError, RunTriageUseCase};
pub use use_cases::submit_assessment::{
    INJECTION_REJECTION, SubmissionOutcome, SubmitAssessmentError, SubmitAssessmentUseCase,
};
