//! HTTP client for the relay server.
//!
//! - `edit_image` posts the current image and instruction to `/api/edit`.
//! - `suggest` fetches an inspiration, magic or LUT prompt.
//! - `health` checks `/health`.
//!
//! Status codes are mapped onto error kinds: 400 is a validation error,
//! 403 a safety block carrying the server's message, anything else a
//! server error. A request that never reaches the server is a
//! connectivity error.
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::normalize_base_url;
use crate::editor::image::ImageState;
use crate::editor::orchestrator::ImageEditor;
use crate::error::{AppError, AppResult, CONNECTIVITY_MESSAGE};
use crate::prompt::suggestions::SuggestionKind;
use crate::relay::protocol::{EditRequest, EditResponse, ErrorBody, HealthResponse, InspirationRequest, PromptResponse};

pub const UNEXPECTED_SERVER_ERROR: &str = "Unexpected error from the server.";

#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        RelayClient { client: Client::new(), base_url: normalize_base_url(base_url) }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, endpoint: &str, body: &B) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", endpoint, e);
            AppError::Connectivity(CONNECTIVITY_MESSAGE.to_string())
        })?;
        handle_response(endpoint, response).await
    }

    pub async fn health(&self) -> AppResult<String> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Health check against {} failed: {}", url, e);
            AppError::Connectivity(CONNECTIVITY_MESSAGE.to_string())
        })?;
        let health: HealthResponse = handle_response("/health", response).await?;
        Ok(health.status)
    }

    /// Send `image` with `prompt` to the model and decode the edited result.
    pub async fn edit_image(&self, image: &ImageState, prompt: &str) -> AppResult<ImageState> {
        let body = EditRequest::new(image.to_base64(), image.mime_type().to_string(), prompt.to_string());
        let response: EditResponse = self.post("/api/edit", &body).await?;
        ImageState::from_data_uri(&response.image_base64)
    }

    pub async fn suggest(&self, kind: SuggestionKind, theme: &str) -> AppResult<String> {
        let response: PromptResponse = match kind {
            SuggestionKind::Inspiration => {
                self.post(kind.path(), &InspirationRequest { theme: theme.to_string() }).await?
            }
            SuggestionKind::Magic | SuggestionKind::Lut => self.post(kind.path(), &serde_json::json!({})).await?,
        };
        Ok(response.prompt)
    }
}

async fn handle_response<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(AppError::HttpClient)?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| UNEXPECTED_SERVER_ERROR.to_string());
        tracing::error!(%status, "{} failed: {}", endpoint, message);
        return Err(match status {
            StatusCode::FORBIDDEN => AppError::SafetyBlock(message),
            StatusCode::BAD_REQUEST => AppError::Validation(message),
            _ => AppError::Server(message),
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!("{} returned a malformed body: {}", endpoint, e);
        AppError::Json(e)
    })
}

#[async_trait]
impl ImageEditor for RelayClient {
    async fn edit_image(&self, image: &ImageState, prompt: &str) -> AppResult<ImageState> {
        RelayClient::edit_image(self, image, prompt).await
    }

    async fn suggest(&self, kind: SuggestionKind, theme: &str) -> AppResult<String> {
        RelayClient::suggest(self, kind, theme).await
    }
}
