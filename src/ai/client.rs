use crate::error::QuizError;
use crate::logger;
use crate::models::ChatTurn;
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/";

/// Anything that can answer a chat-completion request with free text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, messages: Vec<ChatTurn>) -> Result<String, QuizError>;
}

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl OpenRouterClient {
    pub fn new(api_key: &str, base_url: &str, config: ModelConfig) -> Result<Self, QuizError> {
        let client = openrouter_api::OpenRouterClient::new()
            .with_base_url(base_url)
            .map_err(|e| QuizError::Remote(format!("Invalid API base URL: {}", e)))?
            .with_api_key(api_key)
            .map_err(|e| QuizError::Remote(format!("Failed to create OpenRouter client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn build_request(&self, messages: &[ChatTurn]) -> ChatCompletionRequest {
        let messages = messages
            .iter()
            .map(|turn| Message::text(turn.role.as_str(), &turn.content))
            .collect();

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        }
    }
}

#[async_trait]
impl ChatBackend for OpenRouterClient {
    async fn complete(&self, messages: Vec<ChatTurn>) -> Result<String, QuizError> {
        if let Ok(json) = serde_json::to_string(&messages) {
            logger::log(&format!("Chat request ({}): {}", self.config.model, json));
        }

        let request = self.build_request(&messages);

        let response = self
            .client
            .chat()
            .map_err(|e| QuizError::Remote(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| QuizError::Remote(format!("OpenRouter API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| QuizError::Remote("No response choices received".to_string()))?;

        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| {
                    if let openrouter_api::ContentPart::Text(tc) = p {
                        Some(tc.text.clone())
                    } else {
                        None
                    }
                })
                .collect::<Vec<String>>()
                .join("\n"),
        };

        logger::log(&format!("Chat response: {} chars", text.len()));
        Ok(text)
    }
}
