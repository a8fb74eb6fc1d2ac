//! Env-driven configuration for the relay server and the client core.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
use std::env;

use crate::error::{AppError, AppResult};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_EDITOR_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub image_model: String,
    pub text_model: String,
    pub api_host: String,
    pub api_port: String,
    pub editor_api_base_url: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Result<Self, env::VarError> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        Ok(Config {
            gemini_api_key,
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            image_model: env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()),
            editor_api_base_url: normalize_base_url(
                &env::var("EDITOR_API_BASE_URL").unwrap_or_else(|_| DEFAULT_EDITOR_API_BASE_URL.to_string()),
            ),
        })
    }

    /// The relay cannot start without a model key.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("missing GEMINI_API_KEY (or API_KEY) environment variable".to_string()))
    }

    pub fn print_env_vars(&self) {
        let masked = match &self.gemini_api_key {
            Some(k) => {
                let tail: String = k.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
                format!("****{}", tail)
            }
            None => "<unset>".to_string(),
        };
        tracing::info!("GEMINI_API_KEY: {}", masked);
        tracing::info!("GEMINI_BASE_URL: {}", self.gemini_base_url);
        tracing::info!("GEMINI_IMAGE_MODEL: {}", self.image_model);
        tracing::info!("GEMINI_TEXT_MODEL: {}", self.text_model);
        tracing::info!("API_HOST: {}", self.api_host);
        tracing::info!("PORT: {}", self.api_port);
        tracing::info!("EDITOR_API_BASE_URL: {}", self.editor_api_base_url);
    }
}

/// Strip a single trailing slash so endpoint paths can be appended directly.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().strip_suffix('/').unwrap_or(raw.trim()).to_string()
}
