//! Assessment storage adapters

mod jsonl_repository;

pub use jsonl_repository::JsonlAssessmentRepository;
