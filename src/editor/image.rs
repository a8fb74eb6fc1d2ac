//! Immutable encoded image snapshots.
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// One committed image: encoded bytes plus their mime type.
///
/// Cloning is cheap; the payload is shared. `id` is unique per snapshot and
/// is what views compare to notice that the shown image changed.
#[derive(Debug, Clone)]
pub struct ImageState {
    id: Uuid,
    mime_type: String,
    data: Arc<[u8]>,
}

impl ImageState {
    pub fn from_bytes(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        ImageState {
            id: Uuid::new_v4(),
            mime_type: mime_type.into(),
            data: Arc::from(data.into()),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> AppResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| AppError::InvalidImage("missing data: prefix".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::InvalidImage("missing payload separator".to_string()))?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::InvalidImage("only base64 data URIs are supported".to_string()))?;
        if mime_type.is_empty() {
            return Err(AppError::InvalidImage("empty mime type".to_string()));
        }
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::InvalidImage(format!("bad base64 payload: {}", e)))?;
        Ok(Self::from_bytes(data, mime_type))
    }

    pub async fn read_file(path: &Path) -> AppResult<Self> {
        let data = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(data, mime_type_for_path(path)))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Same snapshot, not merely equal bytes.
    pub fn same_as(&self, other: &ImageState) -> bool {
        self.id == other.id
    }
}

/// Guess a mime type from a file extension, defaulting to PNG.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "image/png",
    }
}

/// File extension to use when saving an image of the given mime type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        "image/heif" => "heif",
        _ => "png",
    }
}

/// Strip a `data:...;base64,` prefix if present.
pub fn strip_data_uri_prefix(value: &str) -> &str {
    match value.split_once(',') {
        Some((_, payload)) if value.starts_with("data:") => payload,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_survives_a_round_trip() {
        let img = ImageState::from_bytes(vec![1u8, 2, 3, 250], "image/jpeg");
        let uri = img.to_data_uri();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let back = ImageState::from_data_uri(&uri).unwrap();
        assert_eq!(back.data(), img.data());
        assert_eq!(back.mime_type(), "image/jpeg");
        assert!(!back.same_as(&img));
    }

    #[test]
    fn malformed_data_uris_are_rejected() {
        assert!(ImageState::from_data_uri("image/png;base64,AAAA").is_err());
        assert!(ImageState::from_data_uri("data:image/png,AAAA").is_err());
        assert!(ImageState::from_data_uri("data:image/png;base64").is_err());
        assert!(ImageState::from_data_uri("data:image/png;base64,***").is_err());
    }

    #[test]
    fn prefix_stripping_leaves_bare_payloads_alone() {
        assert_eq!(strip_data_uri_prefix("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri_prefix("QUJD"), "QUJD");
    }

    #[test]
    fn mime_types_follow_extensions() {
        assert_eq!(mime_type_for_path(Path::new("a/b.JPG")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("b.webp")), "image/webp");
        assert_eq!(mime_type_for_path(Path::new("noext")), "image/png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
    }
}
