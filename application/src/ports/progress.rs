//! Progress notification port
//!
//! Defines the interface for reporting progress during a triage negotiation.

use triage_domain::{FinalDecision, Role, StructuredAssessment};

/// Callback for progress updates during a negotiation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called before a role is invoked. `cycle` is 1-based.
    fn on_turn_start(&self, role: Role, cycle: u32);

    /// Called after a role's response has been extracted
    fn on_turn_complete(&self, role: Role, assessment: &StructuredAssessment);

    /// Called after each doctor turn with the agreement verdict
    fn on_agreement_evaluated(&self, _agreed: bool, _cycle: u32) {}

    /// Called once the decision has been resolved
    fn on_negotiation_complete(&self, _decision: &FinalDecision) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_turn_start(&self, _role: Role, _cycle: u32) {}
    fn on_turn_complete(&self, _role: Role, _assessment: &StructuredAssessment) {}
}
