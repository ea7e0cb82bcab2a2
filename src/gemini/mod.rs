pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const VISION_MODEL: &str = "gemini-3-pro-preview";
pub const AUDIO_MODEL: &str = "gemini-3-flash-preview";

pub const TRANSCRIBE_PROMPT: &str =
    "Please transcribe this audio accurately. If there are multiple speakers, identify them if possible.";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map_err(|_| AppError::BadRequest("GEMINI_API_KEY is not set".to_string()))?;
        let base_url = env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }
}

/// Media analysis backed by a generative model. Payloads are base64.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze_image(&self, data: &str, prompt: &str) -> Result<String, AppError>;
    async fn analyze_video(&self, data: &str, prompt: &str, mime_type: &str) -> Result<String, AppError>;
    async fn transcribe_audio(&self, data: &str) -> Result<String, AppError>;
}

pub struct GeminiHttpClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiHttpClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn generate(&self, model: &str, mime_type: &str, data: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );

        let request_body = dto::GenerateContentRequest {
            contents: vec![dto::Content {
                parts: vec![
                    dto::Part::InlineData {
                        inline_data: dto::Blob {
                            mime_type: mime_type.to_string(),
                            data: data.to_string(),
                        },
                    },
                    dto::Part::Text { text: prompt.to_string() },
                ],
            }],
        };

        debug!("calling {} with {} ({} bytes base64)", model, mime_type, data.len());

        let response = self.client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Gemini API error {}: {}", status, body)));
        }

        let parsed: dto::GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse Gemini response: {}", e)))?;

        let text = parsed
            .text()
            .ok_or_else(|| AppError::Upstream("Gemini returned no text".to_string()))?;
        info!("{} returned {} chars", model, text.len());
        Ok(text)
    }
}

#[async_trait]
impl AnalysisClient for GeminiHttpClient {
    async fn analyze_image(&self, data: &str, prompt: &str) -> Result<String, AppError> {
        self.generate(VISION_MODEL, "image/jpeg", data, prompt).await
    }

    async fn analyze_video(&self, data: &str, prompt: &str, mime_type: &str) -> Result<String, AppError> {
        self.generate(VISION_MODEL, mime_type, data, prompt).await
    }

    async fn transcribe_audio(&self, data: &str) -> Result<String, AppError> {
        self.generate(AUDIO_MODEL, "audio/wav", data, TRANSCRIBE_PROMPT).await
    }
}

/// Installed when no API key is configured; every call fails.
pub struct NoopAnalysisClient;

#[async_trait]
impl AnalysisClient for NoopAnalysisClient {
    async fn analyze_image(&self, _data: &str, _prompt: &str) -> Result<String, AppError> {
        Err(AppError::Upstream("analysis client is not configured".to_string()))
    }

    async fn analyze_video(&self, _data: &str, _prompt: &str, _mime_type: &str) -> Result<String, AppError> {
        Err(AppError::Upstream("analysis client is not configured".to_string()))
    }

    async fn transcribe_audio(&self, _data: &str) -> Result<String, AppError> {
        Err(AppError::Upstream("analysis client is not configured".to_string()))
    }
}
