//! Patient note value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Free-text complaint describing the patient (Value Object)
///
/// Immutable once created. The content is kept verbatim; callers are expected
/// to have screened it before constructing a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientNote {
    content: String,
}

impl PatientNote {
    /// Create a new note, rejecting empty or whitespace-only content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyNote);
        }
        Ok(Self { content })
    }

    /// Get the note content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for PatientNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for PatientNote {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        PatientNote::try_new(s)
    }
}

impl TryFrom<String> for PatientNote {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PatientNote::try_new(s)
    }
}
