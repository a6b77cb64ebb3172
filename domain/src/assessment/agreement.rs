//! Agreement evaluation between a nurse response and the doctor's review.
//!
//! Three tiers, strongest signal first:
//!
//! 1. An explicit `Agreement: Yes` in the doctor's text
//! 2. An explicit `Agreement: No` in the doctor's text
//! 3. Equal ESI levels extracted from both texts
//!
//! Missing evidence resolves to disagreement so the negotiation never stops
//! early on data it could not read.

use super::extraction::parse_esi_level;
use regex::Regex;
use std::sync::LazyLock;

static AGREEMENT_YES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bAgreement\s*\**\s*:\s*\**\s*Yes\b").expect("valid regex")
});

static AGREEMENT_NO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bAgreement\s*\**\s*:\s*\**\s*No\b").expect("valid regex")
});

/// Explicit agreement marker found in a doctor's review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementMarker {
    Yes,
    No,
}

/// Look for an explicit agreement marker. `Yes` takes precedence over `No`.
pub fn explicit_marker(doctor_text: &str) -> Option<AgreementMarker> {
    if AGREEMENT_YES_RE.is_match(doctor_text) {
        Some(AgreementMarker::Yes)
    } else if AGREEMENT_NO_RE.is_match(doctor_text) {
        Some(AgreementMarker::No)
    } else {
        None
    }
}

/// Decide whether the doctor agrees with the nurse.
///
/// # Examples
///
/// ```
/// use triage_domain::assessment::agreement::agrees;
///
/// assert!(agrees("ESI Level: 2", "Agreement: Yes"));
/// assert!(agrees("ESI Level: 3", "I'd also say ESI Level: 3"));
/// assert!(!agrees("no level here", "nor here"));
/// ```
pub fn agrees(nurse_text: &str, doctor_text: &str) -> bool {
    match explicit_marker(doctor_text) {
        Some(AgreementMarker::Yes) => true,
        Some(AgreementMarker::No) => false,
        None => match (parse_esi_level(nurse_text), parse_esi_level(doctor_text)) {
            (Some(nurse), Some(doctor)) => nurse == doctor,
            _ => false,
        },
    }
}
