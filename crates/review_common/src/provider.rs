//! Wire types and the backend seam for the chat-completion provider.
//!
//! The provider speaks the OpenAI-compatible chat format. A backend performs
//! exactly one attempt; the retry budget lives in the orchestrator on top of
//! this trait, which is also what keeps the retry policy testable without a
//! network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One message in the chat-completion format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Raw provider response: candidate completions plus token accounting.
/// Only the first choice is ever used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

/// Token usage as reported by the provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Failures from completion attempts. All of these are transient from the
/// gateway's point of view and retried identically.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("completion returned no choices")]
    EmptyChoices,

    #[error("completion failed after retries")]
    RetriesExhausted,
}

/// A single attempt against the completion provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatCompletionRequest {
            model: "meta-llama/Llama-3.3-70B-Instruct".to_string(),
            messages: vec![ChatMessage::system("be terse"), ChatMessage::user("hello")],
            temperature: 0.1,
            max_tokens: 10,
        };

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["model"], "meta-llama/Llama-3.3-70B-Instruct");
        assert_eq!(wire["messages"][0]["role"], "system");
        assert_eq!(wire["messages"][1]["role"], "user");
        assert_eq!(wire["temperature"], 0.1);
        assert_eq!(wire["max_tokens"], 10);
    }

    #[test]
    fn test_response_parses_provider_shape() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "SAME"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 412, "completion_tokens": 2, "total_tokens": 414}
        }))
        .unwrap();

        assert_eq!(response.choices[0].message.content, "SAME");
        assert_eq!(response.usage.prompt_tokens, 412);
        assert_eq!(response.usage.completion_tokens, 2);
        assert_eq!(response.usage.total_tokens, 414);
    }
}
