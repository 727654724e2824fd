//! Client for OpenAI-compatible chat completion endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, LlmConfig};

const RESPONSE_LIMIT: usize = 4 * 1024 * 1024;
const ERROR_BODY_LIMIT: usize = 64 * 1024;

/// Fixed sampling parameters used for every section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self { temperature: 0.3, max_tokens: 800 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("response contained no message content")]
    EmptyResponse,
}

/// Anything that can turn a system + user prompt pair into text.
#[allow(async_fn_in_trait)]
pub trait TextCompleter: Sized {
    /// Build a client from configuration once the API key is known to exist.
    fn connect(config: &LlmConfig, api_key: &str) -> Result<Self, ConfigError>;

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Install ring as the process-wide rustls provider.
/// awc's rustls connector panics when no provider is installed; later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// `awc`-backed chat completion client.
pub struct ChatClient {
    http: awc::Client,
    endpoint: String,
    api_key: String,
    model: String,
    params: SamplingParams,
}

impl ChatClient {
    pub fn new(config: &LlmConfig, api_key: &str, params: SamplingParams) -> Self {
        install_crypto_provider();
        let http = awc::Client::builder().timeout(config.timeout).finish();
        Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            params,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TextCompleter for ChatClient {
    fn connect(config: &LlmConfig, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(config, api_key, SamplingParams::default()))
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_prompt },
            ],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        let mut response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .send_json(&request)
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .body()
                .limit(ERROR_BODY_LIMIT)
                .await
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let parsed: ChatResponse = response
            .json()
            .limit(RESPONSE_LIMIT)
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}
