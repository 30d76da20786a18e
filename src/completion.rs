//! Chat-completion client.
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint (Groq by
//! default). One call sends the composed turns plus generation parameters
//! and returns the first choice's message text.
//!
//! # Failure Modes
//!
//! - Non-success HTTP status → [`ChatError::Service`] with the status and the
//!   response body as message.
//! - Success status with a body lacking `choices[0].message.content` →
//!   [`ChatError::Service`] (malformed response).
//! - Connect errors and timeouts → [`ChatError::Transport`].
//!
//! # Retry Strategy
//!
//! A single attempt by default. With `completion.max_retries > 0`, transient
//! failures are retried with exponential backoff:
//! - HTTP 429 and 5xx → retry
//! - other HTTP 4xx → fail immediately
//! - transport errors → retry
//! - backoff: 1s, 2s, 4s, … (capped at 2^5 seconds)

use serde::Serialize;
use std::time::Duration;

use crate::config::CompletionConfig;
use crate::error::{ChatError, ChatResult};
use crate::models::ChatTurn;

/// Request body sent to the completion endpoint.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f64,
    max_tokens: u32,
}

/// A configured client for one completion endpoint.
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    credential: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    max_retries: u32,
}

impl CompletionClient {
    /// Build a client from configuration, resolving the credential.
    ///
    /// # Errors
    ///
    /// [`ChatError::ConfigurationMissing`] when the endpoint is empty or no
    /// usable credential is set.
    pub fn new(config: &CompletionConfig) -> ChatResult<Self> {
        let credential = config.credential().ok_or_else(|| {
            ChatError::ConfigurationMissing(format!(
                "no API key in completion.api_key or ${}",
                config.api_key_env
            ))
        })?;
        Self::with_credential(config, credential)
    }

    /// Build a client with an explicit credential.
    pub fn with_credential(config: &CompletionConfig, credential: String) -> ChatResult<Self> {
        if !config.has_endpoint() {
            return Err(ChatError::ConfigurationMissing(
                "completion.endpoint is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            credential,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `turns` and return the generated answer.
    pub async fn complete(&self, turns: &[ChatTurn]) -> ChatResult<String> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                // 1s, 2s, 4s, 8s, ...
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            match self.send_once(turns).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "completion attempt failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, turns: &[ChatTurn]) -> ChatResult<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages: turns,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.credential))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = if body_text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body_text
            };
            return Err(ChatError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body_text).map_err(|e| ChatError::Service {
                status: status.as_u16(),
                message: format!("malformed response body: {}", e),
            })?;

        parse_completion_response(&json).ok_or_else(|| ChatError::Service {
            status: status.as_u16(),
            message: "malformed response: missing choices[0].message.content".to_string(),
        })
    }
}

/// Extract `choices[0].message.content` from a completion response.
///
/// Returns `None` when the field is missing or blank.
fn parse_completion_response(json: &serde_json::Value) -> Option<String> {
    let content = json
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()?;

    if content.trim().is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// One-shot convenience: build a client from `config` and complete `turns`.
pub async fn complete(turns: &[ChatTurn], config: &CompletionConfig) -> ChatResult<String> {
    CompletionClient::new(config)?.complete(turns).await
}
