//! Structured field extraction from free-form role responses.
//!
//! Generated text is untrusted and loosely formatted, so every function here is
//! total: a missing field becomes `None` or a sentinel, never an error.
//!
//! | Function | Use Case | Markers |
//! |----------|----------|---------|
//! | [`extract`] | Per-turn assessment | `ESI Level:`, `Reasoning:`, `Confidence:` |
//! | [`extract_level`] | Legacy string results | `ESI <n>`, `Level <n>`, any digits |

use super::esi::EsiLevel;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Reasoning value when no `Reasoning:` span is present
pub const UNCLEAR_REASONING: &str = "Unclear";

/// Confidence value when no `Confidence:` token is present
pub const UNKNOWN_CONFIDENCE: &str = "Unknown";

/// Level returned by [`extract_level`] when nothing numeric is found.
///
/// Means "indeterminate", not a clinical judgment of "Urgent".
pub const INDETERMINATE_LEVEL: u32 = 3;

// "ESI Level: 2", "**ESI Level:** 2". Digits outside 1-5 never match.
static ESI_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bESI\s*\**\s*Level\s*\**\s*[:\-]?\s*\**\s*([1-5])\b").expect("valid regex")
});

// Bare "Level 2", only consulted when no ESI-labelled marker exists.
static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bLevel\s*\**\s*[:\-]?\s*\**\s*([1-5])\b").expect("valid regex")
});

// Span ends at the next labelled section, not at prose uses of the same words.
static REASONING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\bReasoning\s*\**\s*[:\-]\s*\**(.*?)(?:\b(?:Confidence|Comment)\s*\**\s*[:\-]|\z)",
    )
    .expect("valid regex")
});

static CONFIDENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bConfidence\s*\**\s*[:\-]\s*\**\s*(\w+)").expect("valid regex")
});

static LEGACY_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bESI\s*(?:Level)?\s*[:\-]?\s*(\d+)|\bLevel\s*[:\-]?\s*(\d+)")
        .expect("valid regex")
});

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Typed view of one role response (Value Object)
///
/// Produced fresh by [`extract`] for every turn and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAssessment {
    /// ESI level, `None` when no level marker was found
    pub esi_level: Option<EsiLevel>,
    /// Reasoning span, or [`UNCLEAR_REASONING`]
    pub reasoning: String,
    /// Confidence token, or [`UNKNOWN_CONFIDENCE`]
    pub confidence: String,
    /// The full response text, kept for audit
    pub raw_text: String,
}

impl StructuredAssessment {
    pub fn has_level(&self) -> bool {
        self.esi_level.is_some()
    }

    /// Whether the reasoning span was actually found in the text
    pub fn has_reasoning(&self) -> bool {
        self.reasoning != UNCLEAR_REASONING
    }
}

/// Extract the ESI level, reasoning and confidence from a role response.
///
/// Matching is case-insensitive and the first match of each marker wins.
/// Reasoning runs up to the next `Confidence:` or `Comment:` label, or to the
/// end of the text.
///
/// # Examples
///
/// ```
/// use triage_domain::assessment::extraction::extract;
///
/// let a = extract("ESI Level: 2\nReasoning: chest pain\nConfidence: High");
/// assert_eq!(a.esi_level.map(|l| l.value()), Some(2));
/// assert_eq!(a.reasoning, "chest pain");
/// assert_eq!(a.confidence, "High");
/// ```
pub fn extract(text: &str) -> StructuredAssessment {
    StructuredAssessment {
        esi_level: parse_esi_level(text),
        reasoning: parse_reasoning(text).unwrap_or_else(|| UNCLEAR_REASONING.to_string()),
        confidence: parse_confidence(text).unwrap_or_else(|| UNKNOWN_CONFIDENCE.to_string()),
        raw_text: text.to_string(),
    }
}

/// Find the first ESI level marker in the text.
///
/// `ESI Level` markers take precedence; a bare `Level <n>` is used only when
/// the text has none, so prose like "pain level 4/10" cannot shadow the answer.
pub fn parse_esi_level(text: &str) -> Option<EsiLevel> {
    let caps = ESI_LEVEL_RE
        .captures(text)
        .or_else(|| LEVEL_RE.captures(text))?;
    let digit: u32 = caps.get(1)?.as_str().parse().ok()?;
    EsiLevel::new(digit).ok()
}

fn parse_reasoning(text: &str) -> Option<String> {
    let caps = REASONING_RE.captures(text)?;
    let span = caps
        .get(1)?
        .as_str()
        .trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || c == '*' || c == '-');
    if span.is_empty() {
        None
    } else {
        Some(span.to_string())
    }
}

fn parse_confidence(text: &str) -> Option<String> {
    CONFIDENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pull a numeric level out of a legacy string-shaped result.
///
/// Looks for `ESI <n>`, `ESI Level: <n>` or `Level <n>` first, then for any run
/// of digits. Returns [`INDETERMINATE_LEVEL`] when nothing is found. The value
/// is not range-checked.
///
/// # Examples
///
/// ```
/// use triage_domain::assessment::extraction::extract_level;
///
/// assert_eq!(extract_level("ESI Level: 4"), 4);
/// assert_eq!(extract_level("2"), 2);
/// assert_eq!(extract_level("Unable to determine"), 3);
/// ```
pub fn extract_level(text: &str) -> u32 {
    let labelled = LEGACY_LEVEL_RE
        .captures(text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)));

    labelled
        .or_else(|| DIGITS_RE.find(text))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(INDETERMINATE_LEVEL)
}
