//! Core domain concepts shared across all subdomains.
//!
//! - [`note::PatientNote`] - the screened complaint text a triage run starts from
//! - [`role::Role`] - the two clinical roles taking turns in a negotiation
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod note;
pub mod role;
