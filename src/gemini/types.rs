//! Wire types for the `generateContent` REST endpoint.
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const SAFETY_MESSAGE: &str = "Request blocked for safety reasons.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Image plus instruction, asking for an image back.
    pub fn image_edit(base64: &str, mime_type: &str, prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::inline(mime_type, base64), Part::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            }),
        }
    }

    pub fn text(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Part { text: Some(text.to_string()), inline_data: None }
    }

    pub fn inline(mime_type: &str, data: &str) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.to_string(), data: data.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

fn is_safety_reason(reason: &str) -> bool {
    matches!(reason, "SAFETY" | "IMAGE_SAFETY")
}

impl GenerateContentResponse {
    fn first_candidate(&self) -> AppResult<&Candidate> {
        if let Some(reason) = self.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref()) {
            if is_safety_reason(reason) {
                return Err(AppError::SafetyBlock(SAFETY_MESSAGE.to_string()));
            }
            if self.candidates.is_empty() {
                return Err(AppError::Model(format!("Request blocked, reason: {}", reason)));
            }
        }
        self.candidates
            .first()
            .ok_or_else(|| AppError::Model("The AI did not return a valid response.".to_string()))
    }

    /// First inline image as a data URI.
    pub fn into_image_data_uri(self) -> AppResult<String> {
        let candidate = self.first_candidate()?;
        match candidate.finish_reason.as_deref() {
            Some(reason) if is_safety_reason(reason) => {
                return Err(AppError::SafetyBlock(SAFETY_MESSAGE.to_string()));
            }
            Some(reason) if reason != "STOP" => {
                return Err(AppError::Model(format!("Processing interrupted, reason: {}", reason)));
            }
            _ => {}
        }
        candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
            .map(|img| format!("data:{};base64,{}", img.mime_type, img.data))
            .ok_or_else(|| AppError::Model("No image data found in the API response.".to_string()))
    }

    /// Concatenated text parts of the first candidate; may be empty.
    pub fn into_text(self) -> AppResult<String> {
        let candidate = self.first_candidate()?;
        if candidate.finish_reason.as_deref().is_some_and(is_safety_reason) {
            return Err(AppError::SafetyBlock(SAFETY_MESSAGE.to_string()));
        }
        Ok(candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn edit_request_uses_camel_case_wire_names() {
        let body = serde_json::to_value(GenerateContentRequest::image_edit("QUJD", "image/png", "brighter")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(body["contents"][0]["parts"][1]["text"], "brighter");
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
        let text = serde_json::to_value(GenerateContentRequest::text("hi")).unwrap();
        assert!(text.get("generationConfig").is_none());
    }

    #[test]
    fn first_image_part_becomes_a_data_uri() {
        let resp = parse(json!({
            "candidates": [{
                "finishReason": "STOP",
                "content": {"parts": [
                    {"text": "here you go"},
                    {"inlineData": {"mimeType": "image/png", "data": "AAA"}},
                    {"inlineData": {"mimeType": "image/jpeg", "data": "BBB"}}
                ]}
            }]
        }));
        assert_eq!(resp.into_image_data_uri().unwrap(), "data:image/png;base64,AAA");
    }

    #[test]
    fn safety_finish_reason_is_a_safety_block() {
        let resp = parse(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        let err = resp.into_image_data_uri().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SafetyBlock);
        assert_eq!(err.to_string(), SAFETY_MESSAGE);

        let blocked = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert_eq!(blocked.into_text().unwrap_err().kind(), ErrorKind::SafetyBlock);
    }

    #[test]
    fn other_finish_reasons_interrupt() {
        let resp = parse(json!({"candidates": [{"finishReason": "MAX_TOKENS", "content": {"parts": []}}]}));
        let err = resp.into_image_data_uri().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn missing_image_or_candidate_is_an_error() {
        let no_image = parse(json!({"candidates": [{"finishReason": "STOP", "content": {"parts": [{"text": "nope"}]}}]}));
        assert!(no_image.into_image_data_uri().unwrap_err().to_string().contains("No image data"));
        assert!(parse(json!({})).into_image_data_uri().is_err());
    }

    #[test]
    fn text_parts_are_joined() {
        let resp = parse(json!({"candidates": [{"content": {"parts": [{"text": "A cat "}, {"text": "on the moon"}]}}]}));
        assert_eq!(resp.into_text().unwrap(), "A cat on the moon");
    }
}
