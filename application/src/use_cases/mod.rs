//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod invoke_role;
pub mod run_triage;
pub mod submit_assessment;
