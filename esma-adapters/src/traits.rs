//! Backend trait, error taxonomy, and chat message types.

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by completion backends.
pub type BackendResult<T> = Result<T, CompletionError>;

/// Failure classification for the completion boundary.
///
/// Mirrors the session error taxonomy: configuration problems are fatal at
/// construction, connection problems are fatal at the startup probe, and
/// generation problems are recoverable per submission.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Backend is misconfigured (missing key, bad endpoint).
    #[error("completion backend misconfigured: {reason}")]
    Configuration {
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The startup connectivity probe failed.
    #[error("API connection failed: {reason}")]
    Connection {
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A completion call failed. Carries the provider's raw error text
    /// without further classification; displayed verbatim to the user.
    #[error("{message}")]
    Generation {
        /// Raw provider or transport error text.
        message: String,
    },
}

impl CompletionError {
    /// Convenience constructor for configuration failures.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for probe failures.
    #[must_use]
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for generation failures.
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

/// Provider and model identity of a backend instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendMetadata {
    provider: &'static str,
    model: String,
}

impl BackendMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g., "openrouter").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Roles used in the two-message essay request.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The fixed essay-generator instruction.
    System,
    /// The compiled essay instruction.
    User,
}

impl Display for MessageRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::User => "user",
        })
    }
}

/// One message of the chat-style request body.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PromptMessage {
    role: MessageRole,
    content: String,
}

impl PromptMessage {
    /// Creates a new prompt message.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Returns the message role.
    #[must_use]
    pub const fn role(&self) -> MessageRole {
        self.role
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Trait implemented by completion backends; the stubbing seam for the
/// interaction controller.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the provider/model identity of this backend.
    fn metadata(&self) -> &BackendMetadata;

    /// Sends one completion request for the compiled instruction and
    /// returns the generated text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Generation`] on any transport, provider,
    /// or decode failure. No retries are performed.
    async fn generate(&self, instruction: &str) -> BackendResult<String>;

    /// Runs the startup connectivity check against the provider.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Connection`] when the provider is not
    /// reachable or rejects the credentials.
    async fn probe(&self) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::System).expect("serialize"),
            "\"system\""
        );
        assert_eq!(MessageRole::User.to_string(), "user");
    }

    #[test]
    fn generation_error_displays_raw_message() {
        let err = CompletionError::generation("rate limited");
        assert_eq!(err.to_string(), "rate limited");
    }
}
