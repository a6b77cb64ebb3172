//! Text-generation backends

pub mod gemini;
pub mod resilient;

pub use gemini::{DEFAULT_API_KEY_ENV, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiGateway};
pub use resilient::ResilientGateway;
