//! Clinical roles taking part in a triage negotiation

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The two reasoning passes that alternate during a negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Triage nurse: proposes an ESI level from the note
    Nurse,
    /// ER physician: reviews the nurse's proposal
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Nurse => "nurse",
            Role::Doctor => "doctor",
        }
    }

    /// Human-readable label for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Nurse => "Triage Nurse",
            Role::Doctor => "ER Physician",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nurse" => Ok(Role::Nurse),
            "doctor" | "physician" => Ok(Role::Doctor),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Nurse".parse::<Role>().unwrap(), Role::Nurse);
        assert_eq!("physician".parse::<Role>().unwrap(), Role::Doctor);
        assert!("surgeon".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
    }
}
