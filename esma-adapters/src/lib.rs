//! Completion backend for EsMa.
//!
//! One provider, one request per submission: an OpenRouter (OpenAI-style)
//! chat-completions call over HTTPS, plus a startup connectivity probe.

#![warn(missing_docs, clippy::pedantic)]

mod http_client;
mod openrouter;
mod traits;

/// OpenRouter-backed completion client and its configuration.
pub use openrouter::{OpenRouterClient, OpenRouterConfig, DEFAULT_MODEL, MAX_COMPLETION_TOKENS};
/// Backend trait, error taxonomy, and message types.
pub use traits::{
    BackendMetadata, BackendResult, CompletionBackend, CompletionError, MessageRole, PromptMessage,
};
