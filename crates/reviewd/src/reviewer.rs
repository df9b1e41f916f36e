//! Review orchestration: one completion call per request, with timeout,
//! retry and backoff around the flaky provider.
//!
//! Attempts are sequential and never overlap; the orchestrator waits for
//! each attempt's outcome before deciding whether to retry. No cancellation
//! is exposed beyond completion of the returned future.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use review_common::{
    build_prompt, parse_decision, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    CompletionBackend, Entity, GatewayConfig, ProviderError, ReviewResult, BACKOFF_BASE_MS,
    MAX_ATTEMPTS, REQUEST_TIMEOUT_SECS, SYSTEM_PROMPT,
};
use tracing::{info, warn};

/// Sampling temperature: the answer should be as deterministic as the
/// provider allows.
const TEMPERATURE: f64 = 0.1;

/// Output cap: a one-word answer is all we ask for.
const MAX_TOKENS: u32 = 10;

/// DeepInfra OpenAI-compatible chat backend over reqwest.
pub struct DeepInfraBackend {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DeepInfraBackend {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionBackend for DeepInfraBackend {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            // Body captured for diagnostics; it rides along in the error.
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

/// Orchestrates merge reviews against the completion backend.
pub struct MergeReviewer {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl MergeReviewer {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            Arc::new(DeepInfraBackend::new(&config.base_url, &config.api_key)),
            &config.model,
        )
    }

    /// Decide whether two records refer to the same real-world entity.
    pub async fn review_merge(
        &self,
        entity1: &Entity,
        entity2: &Entity,
        similarity: f64,
    ) -> Result<ReviewResult, ProviderError> {
        let prompt = build_prompt(entity1, entity2, similarity);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self.complete_with_retry(&request).await?;

        let choice = response.choices.first().ok_or(ProviderError::EmptyChoices)?;
        let decision = parse_decision(&choice.message.content);
        info!(
            "[<]  decision: {} ({} tokens total)",
            decision, response.usage.total_tokens
        );

        Ok(ReviewResult {
            decision,
            input_tokens: response.usage.prompt_tokens,
            output_tokens: response.usage.completion_tokens,
            total_tokens: response.usage.total_tokens,
        })
    }

    /// Bounded retry loop. Every failure is retried identically, with
    /// `2^attempt * base` backoff between attempts and none after the last.
    async fn complete_with_retry(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let mut last_error = None;

        for attempt in 0..MAX_ATTEMPTS {
            match self.backend.complete(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        "[-]  completion attempt {}/{} failed: {}",
                        attempt + 1,
                        MAX_ATTEMPTS,
                        e
                    );
                    last_error = Some(e);

                    if attempt + 1 < MAX_ATTEMPTS {
                        let backoff = Duration::from_millis(2u64.pow(attempt) * BACKOFF_BASE_MS);
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ProviderError::RetriesExhausted))
    }
}
