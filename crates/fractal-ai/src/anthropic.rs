//! Anthropic Claude provider implementation.

use async_trait::async_trait;
use fractal_core::{CodeProvider, FractalError, ProviderConfig, Result, SamplingParams};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider for code generation.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    config: ProviderConfig,
}

/// Anthropic message request.
#[derive(Debug, Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic message response.
#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let timeout = config.timeout_seconds.unwrap_or(60);
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a provider from environment variables.
    ///
    /// Reads `ANTHROPIC_API_KEY` and optionally `ANTHROPIC_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| FractalError::Config("ANTHROPIC_API_KEY not set".to_string()))?;

        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-sonnet-4-5".to_string());

        Self::new(ProviderConfig::new(api_key, model))
    }

    /// Create a provider from environment with a specific model.
    pub fn from_env_with_model(model: &str) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| FractalError::Config("ANTHROPIC_API_KEY not set".to_string()))?;

        Self::new(ProviderConfig::new(api_key, model))
    }
}

#[async_trait]
impl CodeProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        debug!(model = %self.config.model, "requesting completion from Anthropic");

        let api_request = MessageRequest {
            model: self.config.model.clone(),
            max_tokens: params.max_output_tokens,
            temperature: params.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = self.config.base_url.as_deref().unwrap_or(ANTHROPIC_API_URL);

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FractalError::Upstream(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let msg_response: MessageResponse = response
            .json()
            .await
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        Ok(msg_response
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default())
    }
}
