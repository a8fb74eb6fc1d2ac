//! Common error type shared by the relay server and the client core.
//!
//! Server-side variants map onto HTTP statuses through `IntoResponse`;
//! client-side code classifies failures with [`AppError::kind`].
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Message shown when the relay cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";

/// Message shown for failures with no more specific explanation.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    SafetyBlock(String),

    #[error("{0}")]
    Model(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Connectivity(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An edit is already in progress")]
    EditInProgress,

    #[error("No image loaded")]
    NoImage,
}

/// Coarse classification used to pick the user-facing presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    SafetyBlock,
    Transient,
    Connectivity,
    Client,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::SafetyBlock(_) => ErrorKind::SafetyBlock,
            AppError::Model(_) | AppError::Server(_) | AppError::HttpClient(_) | AppError::Json(_) => {
                ErrorKind::Transient
            }
            AppError::Connectivity(_) => ErrorKind::Connectivity,
            AppError::Io(_)
            | AppError::InvalidImage(_)
            | AppError::Config(_)
            | AppError::EditInProgress
            | AppError::NoImage => ErrorKind::Client,
        }
    }

    /// Text for the single user-visible message slot.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Connectivity(_) => CONNECTIVITY_MESSAGE.to_string(),
            AppError::HttpClient(_) | AppError::Json(_) | AppError::InvalidImage(_) => {
                UNKNOWN_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::SafetyBlock => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
