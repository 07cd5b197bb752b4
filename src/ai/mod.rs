pub mod client;
pub mod generator;
pub mod grader;

// Public API exports
pub use client::{ChatBackend, ModelConfig, OpenRouterClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use generator::{generate_questions, parse_questions};
pub use grader::grade_answers;

#[cfg(test)]
pub mod mock;
