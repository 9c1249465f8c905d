//! Completion-service client.
//!
//! Defines the [`CompletionProvider`] trait — the single request/response
//! contract the answer orchestrator consumes — and the
//! [`HttpCompletionProvider`] implementation for OpenAI-compatible
//! `POST /chat/completions` endpoints.
//!
//! There is deliberately no retry loop here: a transport error, non-2xx
//! status, or malformed body is a hard service failure propagated to the
//! `ask` caller. The only local policy is the request timeout.

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use askdoc_core::models::TokenUsage;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::CompletionConfig;

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "ASKDOC_API_KEY";

/// A completion response: the generated text plus token accounting.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// The external text-completion capability, one prompt in, one answer
/// out. Synchronous from the caller's perspective; may fail.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Completion>;
}

/// Provider calling an OpenAI-compatible chat-completions API.
pub struct HttpCompletionProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl HttpCompletionProvider {
    /// Build a provider from configuration. Requires the
    /// [`API_KEY_ENV`] environment variable to be set.
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| anyhow!("{} environment variable not set", API_KEY_ENV))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

/// Wire shape of a chat-completions response. Usage counters missing
/// from the body deserialize to zero.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("completion API error {}: {}", status, body_text);
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("completion response contains no choices"))?;

        Ok(Completion {
            text,
            usage: TokenUsage {
                prompt_tokens: parsed.usage.prompt_tokens,
                candidate_tokens: parsed.usage.completion_tokens,
                total_tokens: parsed.usage.total_tokens,
            },
        })
    }
}
