//! Reqwest-backed OpenAI chat-completions generator.
//!
//! This adapter owns transport details only: bearer authentication, request
//! serialisation, the client timeout, HTTP error mapping and decoding the first
//! choice into plain itinerary text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use super::dto::{ApiErrorEnvelopeDto, ChatCompletionRequestDto, ChatCompletionResponseDto};
use crate::domain::ItineraryPrompt;
use crate::domain::ports::{GenerationError, ItineraryGenerator};

/// Default chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
/// Default API base.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default client timeout.
pub const DEFAULT_OPENAI_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for [`OpenAiItineraryGenerator`].
#[derive(Clone)]
pub struct OpenAiSettings {
    /// Bearer credential. Wiped from memory on drop and never logged.
    pub api_key: Zeroizing<String>,
    /// Chat model identifier.
    pub model: String,
    /// API base; `chat/completions` is resolved relative to it.
    pub base_url: Url,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiGeneratorError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The completions endpoint could not be derived from the base URL.
    #[error("invalid OpenAI base URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Generator that asks an OpenAI-compatible chat model for the itinerary.
pub struct OpenAiItineraryGenerator {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    model: String,
}

impl OpenAiItineraryGenerator {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed or the base URL
    /// cannot be extended with `chat/completions`.
    pub fn new(settings: OpenAiSettings) -> Result<Self, OpenAiGeneratorError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        let endpoint = completions_endpoint(&settings.base_url)?;
        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key,
            model: settings.model,
        })
    }
}

/// Resolve `chat/completions` beneath `base`, keeping any path prefix such as
/// `/v1`.
fn completions_endpoint(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("chat/completions")
}

#[async_trait]
impl ItineraryGenerator for OpenAiItineraryGenerator {
    async fn generate(&self, prompt: &ItineraryPrompt) -> Result<String, GenerationError> {
        debug!(model = %self.model, "requesting itinerary completion");
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&ChatCompletionRequestDto::user_prompt(
                &self.model,
                prompt.as_str(),
            ))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_plan(body.as_ref())
    }
}

fn parse_plan(body: &[u8]) -> Result<String, GenerationError> {
    let decoded: ChatCompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        GenerationError::decode(format!("invalid chat completion payload: {error}"))
    })?;
    decoded
        .into_first_content()
        .ok_or_else(GenerationError::empty_response)
}

fn map_transport_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::transport(format!("request timed out: {error}"))
    } else {
        GenerationError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GenerationError {
    let message = serde_json::from_slice::<ApiErrorEnvelopeDto>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body_preview(body));
    GenerationError::upstream(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
