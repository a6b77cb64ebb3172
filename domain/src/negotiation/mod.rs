//! Negotiation domain
//!
//! The nurse/doctor loop as an explicit finite-state machine:
//! [`NegotiationState`] carries the data, [`NegotiationPhase`] decides what
//! runs next. The bound of [`MAX_DOCTOR_TURNS`] caps a run at two nurse and two
//! doctor calls.

pub mod phase;
pub mod state;

pub use phase::NegotiationPhase;
pub use state::{MAX_DOCTOR_TURNS, NegotiationState};
