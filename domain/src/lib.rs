//! Domain layer for triage-consensus
//!
//! This crate contains the core triage logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Negotiation
//!
//! A triage nurse proposes an ESI level for a patient note, an ER physician
//! reviews it, and the two take turns until they agree or the turn bound is
//! reached:
//!
//! ```text
//! note ─► NurseTurn ─► DoctorTurn ─┬─► Done ─► resolve ─► translate
//!            ▲                     │
//!            └──── disagreement ───┘
//! ```
//!
//! ## Extraction
//!
//! Role responses are free text. [`extract`] turns them into a
//! [`StructuredAssessment`] without ever failing; missing fields become
//! `None` or a sentinel value.
//!
//! ## Resolution
//!
//! [`resolve`] collapses the terminal state into a [`FinalDecision`] tagged
//! with a [`ConsensusKind`], and [`translate`] renders it for the patient.

pub mod assessment;
pub mod config;
pub mod core;
pub mod decision;
pub mod negotiation;
pub mod prompt;
pub mod screening;

// Re-export commonly used types
pub use assessment::{
    EsiLevel, INDETERMINATE_LEVEL, StructuredAssessment, UNCLEAR_REASONING, UNKNOWN_CONFIDENCE,
    agrees, extract, extract_level,
};
pub use config::OutputFormat;
pub use core::{error::DomainError, note::PatientNote, role::Role};
pub use decision::{ConsensusKind, FinalDecision, FinalLevel, UNDETERMINED_LABEL, resolve, translate};
pub use negotiation::{MAX_DOCTOR_TURNS, NegotiationPhase, NegotiationState};
pub use prompt::PromptTemplate;
pub use screening::is_prompt_injection;
