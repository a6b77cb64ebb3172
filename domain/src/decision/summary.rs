//! Patient-facing translation of a final decision

use super::resolver::FinalDecision;
use crate::assessment::esi::EsiLevel;

/// Sentence shown when the level could not be determined
pub const FALLBACK_EXPLANATION: &str = "We will assess you further shortly.";

const CLOSING_NOTE: &str = "Our medical team will keep you informed and comfortable at every step.";

/// Plain-language explanation of what a level means for the patient
pub fn explanation(level: EsiLevel) -> &'static str {
    match level.value() {
        1 => "You need immediate medical attention. Our team is ready and will take care of you right away.",
        2 => "You're in a high-risk situation. You'll be seen very soon to prevent any complications.",
        3 => "You are stable but may need tests or procedures. Please stay comfortable while we prepare.",
        4 => "You are not in immediate danger. You may need one or two simple tests.",
        5 => "This is a minor issue. You can safely wait or consider seeing a general doctor later.",
        _ => FALLBACK_EXPLANATION,
    }
}

/// Render a decision as a short markdown message for a non-clinical reader.
pub fn translate(decision: &FinalDecision) -> String {
    let explanation = decision
        .esi_level
        .level()
        .map(explanation)
        .unwrap_or(FALLBACK_EXPLANATION);

    format!(
        "**Your Triage Result**\n\n**Urgency Level:** {}\n**What It Means:** {}\n{}\n\n{}\n",
        decision.esi_level, decision.description, explanation, CLOSING_NOTE
    )
}
