//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;

use artdx_chat::{ModelClient, ModelError, RequestTurn};
use artdx_core::config::ModelConfig;
use artdx_core::{ArtdxError, Result};

use crate::wire::{self, GenerateResponse};

/// Consulted when the configured key variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Model client backed by the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self> {
        if !config.provider.eq_ignore_ascii_case("gemini") {
            return Err(ArtdxError::Config(format!(
                "unsupported model provider '{}'",
                config.provider
            )));
        }
        if config.model.trim().is_empty() {
            return Err(ArtdxError::Config("model name is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ArtdxError::Model(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.trim().to_string(),
            api_key: api_key.into(),
            temperature: config.temperature,
        })
    }

    /// Build a client with the key read from the process environment.
    pub fn from_env(config: &ModelConfig) -> Result<Self> {
        let key = resolve_api_key(config, |name| std::env::var(name).ok())?;
        Self::new(config, key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        endpoint_for(&self.api_base, &self.model)
    }
}

/// Look up the API key in `config.api_key_env`, then [`FALLBACK_API_KEY_ENV`].
pub fn resolve_api_key<F>(config: &ModelConfig, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    non_empty(&config.api_key_env)
        .or_else(|| non_empty(FALLBACK_API_KEY_ENV))
        .ok_or_else(|| {
            ArtdxError::MissingCredential(format!(
                "set {} (or {}) to a Gemini API key",
                config.api_key_env, FALLBACK_API_KEY_ENV
            ))
        })
}

fn endpoint_for(api_base: &str, model: &str) -> String {
    let model = model.strip_prefix("models/").unwrap_or(model);
    format!("{}/models/{}:generateContent", api_base, model)
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        turns: &[RequestTurn],
    ) -> std::result::Result<String, ModelError> {
        let body = wire::build_request(system_instruction, turns, self.temperature);
        tracing::debug!(model = %self.model, turns = turns.len(), "Calling generateContent");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: wire::error_message(&text),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| ModelError::Parse(e.to_string()))?;
        let answer = wire::extract_text(parsed)?;
        tracing::debug!(chars = answer.len(), "Gemini answered");
        Ok(answer)
    }
}
