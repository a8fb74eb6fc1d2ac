//! JSON bodies exchanged between the editor and the relay server.
use serde::{Deserialize, Serialize};

/// `POST /api/edit`. Fields are optional on the wire so the server can
/// report which ones are missing instead of failing to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl EditRequest {
    pub fn new(image_base64: String, mime_type: String, prompt: String) -> Self {
        EditRequest {
            image_base64: Some(image_base64),
            mime_type: Some(mime_type),
            prompt: Some(prompt),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    /// `data:<mime>;base64,<data>`
    pub image_base64: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspirationRequest {
    #[serde(default)]
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
