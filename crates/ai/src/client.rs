//! Chat-completion client: the port the engine talks through, plus the
//! reqwest implementation against the x.ai API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Endpoint of the external chat-completion API.
pub const CHAT_COMPLETIONS_URL: &str = "https://api.x.ai/v1/chat/completions";

/// Model used for both the reply and the analysis step.
pub const DEFAULT_MODEL: &str = "grok-4-1-fast-reasoning";

/// Per-call timeout. A hung upstream call fails instead of hanging the
/// request; there is no retry afterwards.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One message in the outbound wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Port the engine depends on. Implementations must be single-attempt:
/// retries belong to the caller's policy, and today there are none.
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send one completion request and return the first choice's content.
    async fn complete(
        &self,
        messages: Vec<WireMessage>,
        temperature: f32,
    ) -> Result<String, AnalysisError>;
}

/// reqwest-backed client for the x.ai chat-completion API.
///
/// Holds the credential as an `Option` so construction never fails; a
/// missing key fails each call with [`AnalysisError::MissingApiKey`] before
/// any network I/O.
#[derive(Debug, Clone)]
pub struct GrokClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    url: String,
}

impl GrokClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_string(),
            url: CHAT_COMPLETIONS_URL.to_string(),
        }
    }

    /// Read the credential from `GROK_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GROK_API_KEY").ok())
    }

    /// Override the endpoint (tests against a local stub).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait::async_trait]
impl ChatCompletion for GrokClient {
    async fn complete(
        &self,
        messages: Vec<WireMessage>,
        temperature: f32,
    ) -> Result<String, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.model,
            messages: &messages,
            temperature,
        };

        let response = self
            .http
            .post(&self.url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::UpstreamPayload(format!("response body: {e}")))?;

        data.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AnalysisError::UpstreamPayload("no choices in response".to_string()))
    }
}
