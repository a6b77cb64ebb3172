//! Decision domain
//!
//! - [`resolver`] - terminal negotiation state to [`FinalDecision`]
//! - [`summary`] - [`FinalDecision`] to patient-facing text

pub mod resolver;
pub mod summary;

pub use resolver::{ConsensusKind, FinalDecision, FinalLevel, UNDETERMINED_LABEL, resolve};
pub use summary::translate;
