//! Generative model access used by the relay server.
pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::prompt::suggestions::{clean_suggestion, meta_prompt, SuggestionKind};

/// The external model, as seen by the relay handlers.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Edit `image_base64` according to `prompt`; returns a data URI.
    async fn edit_image(&self, image_base64: &str, mime_type: &str, prompt: &str) -> AppResult<String>;

    /// Free-form text completion.
    async fn generate_text(&self, prompt: &str) -> AppResult<String>;
}

/// Ask the text model for a suggestion of `kind`.
pub async fn generate_suggestion(model: &dyn GenerativeModel, kind: SuggestionKind, theme: &str) -> AppResult<String> {
    let prompt = meta_prompt(kind, theme, &mut rand::thread_rng())?;
    let raw = match model.generate_text(&prompt).await {
        Ok(raw) => raw,
        Err(AppError::SafetyBlock(_)) => return Err(AppError::SafetyBlock(kind.safety_message().to_string())),
        Err(e) => return Err(e),
    };
    let text = clean_suggestion(&raw);
    if text.is_empty() {
        return Err(AppError::Model(kind.empty_message().to_string()));
    }
    Ok(text)
}
