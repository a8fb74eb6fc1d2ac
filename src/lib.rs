//! AI photo editor: relay server and client-side editing core
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the relay binary.
//! - `gemini`: Client for the generative model's `generateContent` endpoint.
//! - `relay`: Wire types and the HTTP client the editor uses to reach the relay.
//! - `editor`: Edit history, pending adjustments, comparator and orchestrator.
//! - `prompt`: Instruction builders, presets and suggestion meta-prompts.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `GeminiClient`,
//! `RelayClient`, `EditOrchestrator`, `EditSession` and `PromptConstructor`.
pub mod api;
pub mod gemini;
pub mod relay;
pub mod editor;
pub mod prompt;
pub mod config;
pub mod error;

pub use config::Config;
pub use gemini::client::GeminiClient;
pub use relay::client::RelayClient;
pub use editor::history::EditSession;
pub use editor::orchestrator::EditOrchestrator;
pub use prompt::constructor::PromptConstructor;
