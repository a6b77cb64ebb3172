//! Prompt domain
//!
//! Role prompts sent to the generation backend on each negotiation turn.

mod template;

pub use template::PromptTemplate;
