//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Patient note cannot be empty")]
    EmptyNote,

    #[error("Invalid ESI level: {0} (expected 1-5)")]
    InvalidEsiLevel(u32),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidEsiLevel(7).to_string(),
            "Invalid ESI level: 7 (expected 1-5)"
        );
        assert_eq!(
            DomainError::EmptyNote.to_string(),
            "Patient note cannot be empty"
        );
    }
}
