//! Prompt templates for the two negotiation roles

use crate::core::role::Role;
use crate::negotiation::state::NegotiationState;

/// Templates for generating role prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Build the prompt for `role` from the current negotiation state.
    ///
    /// The nurse sees the note and the doctor's previous review (empty on the
    /// first turn); the doctor sees the note and the nurse's latest response.
    pub fn for_role(role: Role, state: &NegotiationState) -> String {
        let note = state.note().content();
        match role {
            Role::Nurse => Self::nurse_prompt(note, state.doctor_text().unwrap_or_default()),
            Role::Doctor => Self::doctor_prompt(note, state.nurse_text().unwrap_or_default()),
        }
    }

    /// Prompt asking the triage nurse for an ESI level
    pub fn nurse_prompt(note: &str, doctor_msg: &str) -> String {
        format!(
            r#"You are an experienced ER triage nurse. Your task is to assess the Emergency Severity Index (ESI) for a new patient.

Patient Note: {}
Doctor's Previous Input (if any): {}

Step-by-step reasoning:
1. Summarize the key symptoms and risks.
2. Think aloud: Does this patient need immediate attention or tests?
3. Decide ESI level (1-5) with justification.
4. Reflect: Are you confident in this choice?

Your structured response:
Assessment:
ESI Level: X
Reasoning: ...
Confidence: High/Medium/Low"#,
            note, doctor_msg
        )
    }

    /// Prompt asking the ER physician to review the nurse's assessment
    pub fn doctor_prompt(note: &str, nurse_msg: &str) -> String {
        format!(
            r#"You are an ER physician reviewing a triage assessment.

Patient Note: {}
Nurse's ESI Assessment:
{}

Step-by-step:
1. Restate main clinical concerns.
2. Do you agree with the ESI level? Why/why not?
3. If you disagree, suggest the correct ESI with reasoning.
4. Reflect on clarity and sufficiency of the nurse's reasoning.

Your structured response:
Assessment:
- Agreement: Yes/No
- Suggested ESI Level: X (if different)
- Reasoning: ...
- Comment: ..."#,
            note, nurse_msg
        )
    }
}
