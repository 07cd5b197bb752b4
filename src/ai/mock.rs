//! Scripted chat backend for tests.

use crate::ai::ChatBackend;
use crate::error::QuizError;
use crate::models::ChatTurn;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

/// A reply the mock gives when a request's last user turn contains `trigger`.
pub struct ScriptedReply {
    pub trigger: String,
    pub delay: Duration,
    pub reply: Result<String, String>,
}

/// Mock backend: matches each request against its script, sleeps, then answers.
/// Requests that match nothing get `fallback`.
pub struct MockChatBackend {
    script: Vec<ScriptedReply>,
    fallback: String,
    requests: Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockChatBackend {
    pub fn replying(fallback: &str) -> Self {
        Self {
            script: Vec::new(),
            fallback: fallback.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, trigger: &str, delay_ms: u64, reply: Result<&str, &str>) -> Self {
        self.script.push(ScriptedReply {
            trigger: trigger.to_string(),
            delay: Duration::from_millis(delay_ms),
            reply: reply.map(str::to_string).map_err(str::to_string),
        });
        self
    }

    pub fn requests(&self) -> Vec<Vec<ChatTurn>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, messages: Vec<ChatTurn>) -> Result<String, QuizError> {
        self.requests.lock().unwrap().push(messages.clone());

        let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        let Some(entry) = self.script.iter().find(|s| prompt.contains(&s.trigger)) else {
            return Ok(self.fallback.clone());
        };

        sleep(entry.delay).await;
        entry.reply.clone().map_err(QuizError::Remote)
    }
}
