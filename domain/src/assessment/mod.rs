//! Assessment domain
//!
//! Turns free-form role responses into typed data and decides whether two
//! responses agree.
//!
//! - [`esi::EsiLevel`] - validated ESI level with its clinical description
//! - [`extraction`] - total extraction of level, reasoning and confidence
//! - [`agreement`] - three-tier agreement test

pub mod agreement;
pub mod esi;
pub mod extraction;

pub use agreement::{AgreementMarker, agrees};
pub use esi::{EsiLevel, PENDING_DESCRIPTION};
pub use extraction::{
    INDETERMINATE_LEVEL, StructuredAssessment, UNCLEAR_REASONING, UNKNOWN_CONFIDENCE, extract,
    extract_level,
};
