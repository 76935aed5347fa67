use crate::error::ChatError;
use crate::models::ChatTurn;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions about the \
user's uploaded documents. Base your answers only on the context excerpts below and say so \
when the context does not contain the answer.";

const DEFAULT_TEMPERATURE: f32 = 0.5;
const DEFAULT_MAX_TOKENS: u32 = 512;

#[async_trait]
pub trait ChatModel {
    async fn complete(
        &self,
        question: &str,
        context: &[String],
        history: &[ChatTurn],
    ) -> Result<String, ChatError>;
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct HostedChatModel {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl HostedChatModel {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            client: Client::new(),
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

fn build_messages(question: &str, context: &[String], history: &[ChatTurn]) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);

    let system = if context.is_empty() {
        SYSTEM_PROMPT.to_string()
    } else {
        format!("{SYSTEM_PROMPT}\n\nContext:\n{}", context.join("\n\n"))
    };
    messages.push(WireMessage {
        role: "system".to_string(),
        content: system,
    });

    for turn in history {
        messages.push(WireMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        });
    }

    messages.push(WireMessage {
        role: "user".to_string(),
        content: question.to_string(),
    });

    messages
}

#[async_trait]
impl ChatModel for HostedChatModel {
    async fn complete(
        &self,
        question: &str,
        context: &[String],
        history: &[ChatTurn],
    ) -> Result<String, ChatError> {
        let payload = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(question, context, history),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ChatError::BackendResponse {
                backend: "chat".to_string(),
                details: response.status().to_string(),
            });
        }

        let parsed: Value = response.json().await?;
        parsed
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ChatError::BackendResponse {
                backend: "chat".to_string(),
                details: "response had no message content".to_string(),
            })
    }
}
