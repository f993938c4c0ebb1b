//! `OpenRouter` completion client (OpenAI-compatible chat completions).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use esma_prompts::ESSAY_SYSTEM_INSTRUCTION;
use hyper::body::to_bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Request, Uri};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use crate::http_client::{build_client, HttpsClient};
use crate::traits::{
    BackendMetadata, BackendResult, CompletionBackend, CompletionError, MessageRole, PromptMessage,
};

/// Model identifier used for every essay completion.
pub const DEFAULT_MODEL: &str = "nousresearch/deephermes-3-mistral-24b-preview:free";

/// Generous output budget so long essays are not truncated mid-prose.
pub const MAX_COMPLETION_TOKENS: u32 = 20_000;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/";

/// Configuration for the `OpenRouter` client.
#[derive(Clone, Debug)]
pub struct OpenRouterConfig {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenRouterConfig {
    /// Creates a configuration with the fixed essay model and the public
    /// `OpenRouter` base URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Supplies the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the provider base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Configuration`] if the URL lacks an
    /// http(s) scheme or does not parse.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> BackendResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Overrides the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Completion client that issues one chat-completions call per submission.
pub struct OpenRouterClient {
    client: HttpsClient,
    chat_endpoint: Uri,
    models_endpoint: Uri,
    metadata: BackendMetadata,
    api_key: String,
    timeout: Duration,
}

impl fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("model", &self.metadata.model())
            .field("chat_endpoint", &self.chat_endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenRouterClient {
    /// Constructs a client from the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Configuration`] when the API key is
    /// missing or an endpoint does not parse.
    pub fn new(config: OpenRouterConfig) -> BackendResult<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| CompletionError::configuration("OpenRouter client requires an API key"))?;

        let chat_endpoint = parse_endpoint(&config.base_url, "chat/completions")?;
        let models_endpoint = parse_endpoint(&config.base_url, "models")?;
        let metadata = BackendMetadata::new("openrouter", config.model);

        Ok(Self {
            client: build_client(),
            chat_endpoint,
            models_endpoint,
            metadata,
            api_key,
            timeout: config.timeout,
        })
    }

    fn build_request(&self, instruction: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.metadata.model().to_owned(),
            messages: vec![
                PromptMessage::new(MessageRole::System, ESSAY_SYSTEM_INSTRUCTION),
                PromptMessage::new(MessageRole::User, instruction),
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    fn metadata(&self) -> &BackendMetadata {
        &self.metadata
    }

    async fn generate(&self, instruction: &str) -> BackendResult<String> {
        let payload = self.build_request(instruction);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            CompletionError::generation(format!("failed to encode completion request: {err}"))
        })?;

        debug!(
            model = %self.metadata.model(),
            instruction_len = instruction.len(),
            "sending completion request"
        );

        let request = Request::post(self.chat_endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .body(Body::from(body))
            .map_err(|err| {
                CompletionError::generation(format!("failed to build completion request: {err}"))
            })?;

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| CompletionError::generation("completion request timed out"))?
            .map_err(|err| CompletionError::generation(err.to_string()))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body())
            .await
            .map_err(|err| CompletionError::generation(err.to_string()))?;

        if !status.is_success() {
            // The provider's raw error text is the user-facing message.
            return Err(CompletionError::generation(
                String::from_utf8_lossy(&bytes).to_string(),
            ));
        }

        let response: ChatCompletionResponse = serde_json::from_slice(&bytes).map_err(|err| {
            CompletionError::generation(format!("failed to decode completion response: {err}"))
        })?;

        // Whatever the first choice holds passes through verbatim; an empty
        // completion is still a success.
        Ok(response
            .choices
            .into_iter()
            .find_map(|choice| choice.message.and_then(|message| message.content))
            .unwrap_or_default())
    }

    async fn probe(&self) -> BackendResult<()> {
        let request = Request::get(self.models_endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .body(Body::empty())
            .map_err(|err| CompletionError::connection(err.to_string()))?;

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| CompletionError::connection("connectivity probe timed out"))?
            .map_err(|err| CompletionError::connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let bytes = to_bytes(response.into_body())
                .await
                .map_err(|err| CompletionError::connection(err.to_string()))?;
            return Err(CompletionError::connection(format!(
                "provider returned {status}: {}",
                String::from_utf8_lossy(&bytes)
            )));
        }

        debug!(endpoint = %self.models_endpoint, "connectivity probe succeeded");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<PromptMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn sanitize_base_url(input: &str) -> BackendResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(CompletionError::configuration(
            "base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| CompletionError::configuration(format!("invalid base URL: {err}")))?;
    Ok(base)
}

fn parse_endpoint(base_url: &str, path: &str) -> BackendResult<Uri> {
    format!("{base_url}{path}").parse::<Uri>().map_err(|err| {
        CompletionError::configuration(format!("invalid endpoint `{base_url}{path}`: {err}"))
    })
}
