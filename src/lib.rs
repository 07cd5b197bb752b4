pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod config;
pub mod credential;
pub mod db;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod pdf;
pub mod ui;
pub mod utils;
pub mod workflow;

// Re-exports for convenience
pub use ai::{generate_questions, grade_answers, ChatBackend, ModelConfig, OpenRouterClient};
pub use app::{App, Popup, SourceField};
pub use config::AppConfig;
pub use credential::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
pub use error::QuizError;
pub use models::{AiRequest, AiResponse, FeedbackItem};
pub use workflow::{transition, QuizSession, WorkflowEvent, WorkflowState};
