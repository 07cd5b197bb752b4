use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User answers keyed by question index.
pub type Answers = BTreeMap<usize, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One turn of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Graded answer for one question. `feedback` is the model's raw reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub question: String,
    pub answer: String,
    pub feedback: String,
}

#[derive(Debug)]
pub enum AiRequest {
    Generate {
        source_text: String,
    },
    Grade {
        source_text: String,
        questions: Vec<String>,
        answers: Answers,
    },
}

#[derive(Debug)]
pub enum AiResponse {
    Questions(Result<Vec<String>, QuizError>),
    Feedback(Result<Vec<FeedbackItem>, QuizError>),
}
