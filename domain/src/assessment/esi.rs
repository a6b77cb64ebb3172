//! Emergency Severity Index value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Description used when no ESI level could be determined
pub const PENDING_DESCRIPTION: &str = "Assessment pending";

/// An ESI triage level, 1 (most urgent) to 5 (least urgent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EsiLevel(u8);

impl EsiLevel {
    pub const IMMEDIATE: EsiLevel = EsiLevel(1);
    pub const EMERGENT: EsiLevel = EsiLevel(2);
    pub const URGENT: EsiLevel = EsiLevel(3);
    pub const LESS_URGENT: EsiLevel = EsiLevel(4);
    pub const NON_URGENT: EsiLevel = EsiLevel(5);

    pub fn new(level: u32) -> Result<Self, DomainError> {
        match level {
            1..=5 => Ok(Self(level as u8)),
            other => Err(DomainError::InvalidEsiLevel(other)),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Clinical label for this level
    pub fn description(&self) -> &'static str {
        match self.0 {
            1 => "Immediate — Life-threatening",
            2 => "Emergent — High risk, don't delay",
            3 => "Urgent — Stable but needs attention",
            4 => "Less Urgent — Stable, minor issue",
            5 => "Non-Urgent — Can wait",
            _ => PENDING_DESCRIPTION,
        }
    }
}

impl std::fmt::Display for EsiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for EsiLevel {
    type Error = DomainError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        EsiLevel::new(level)
    }
}

impl Serialize for EsiLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for EsiLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u32::deserialize(deserializer)?;
        EsiLevel::new(raw).map_err(serde::de::Error::custom)
    }
}
