//! Thin HTTP client for the Gemini `generateContent` endpoint.
//!
//! - `edit_image` sends an inline image plus instruction to the image model.
//! - `generate_text` asks the text model for a short suggestion.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::gemini::types::{GenerateContentRequest, GenerateContentResponse};
use crate::gemini::GenerativeModel;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    image_model: String,
    text_model: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, image_model: String, text_model: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        GeminiClient { client: Client::new(), base_url: base, api_key, image_model, text_model }
    }

    async fn generate(&self, model: &str, body: &GenerateContentRequest) -> AppResult<GenerateContentResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        tracing::info!("Sending generateContent request to model {}", model);

        let response = self.client.post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            let parsed: GenerateContentResponse = response.json().await.map_err(AppError::HttpClient)?;
            tracing::debug!(candidates = parsed.candidates.len(), "generateContent response received");
            Ok(parsed)
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let detail = serde_json::from_str::<Value>(&error_body)
                .ok()
                .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(error_body);
            let error_message = format!("Model request failed. Status: {}, Body: {}", status, detail);
            tracing::error!("{}", error_message);
            Err(AppError::Model(error_message))
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn edit_image(&self, image_base64: &str, mime_type: &str, prompt: &str) -> AppResult<String> {
        let body = GenerateContentRequest::image_edit(image_base64, mime_type, prompt);
        self.generate(&self.image_model, &body).await?.into_image_data_uri()
    }

    async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        let body = GenerateContentRequest::text(prompt);
        self.generate(&self.text_model, &body).await?.into_text()
    }
}
