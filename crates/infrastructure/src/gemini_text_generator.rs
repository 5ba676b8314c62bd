//! Google Generative Language API client for candidate ranking.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use servir_application::TextGenerator;
use servir_core::{AppError, AppResult};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    pub api_key: String,
    /// Model name, for example `gemini-pro`.
    pub model: String,
    /// Request timeout. The caller treats a timeout as any other ranking
    /// failure, so this bounds how long a suggestion can stall.
    pub timeout: Duration,
}

/// [`TextGenerator`] backed by the Google Generative Language API.
pub struct GeminiTextGenerator {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiTextGenerator {
    /// Creates a generator with its own HTTP client.
    pub fn new(config: GeminiConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build Gemini HTTP client: {error}"))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.config.model,
            key = self.config.api_key,
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "requesting text generation"
        );

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("Gemini request failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Internal(format!(
                "Gemini request failed with status {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|error| {
            AppError::Internal(format!("Gemini response was not valid JSON: {error}"))
        })?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Internal(
                "Gemini response contained no text candidates".to_owned(),
            ));
        }

        Ok(text)
    }
}
