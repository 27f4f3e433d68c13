//! OpenAI provider implementation.
//!
//! Works against the chat completions API and any OpenAI-compatible
//! endpoint via a base URL override.

use async_trait::async_trait;
use fractal_core::{CodeProvider, FractalError, ProviderConfig, Result, SamplingParams};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI provider for code generation.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
}

/// OpenAI chat completion request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// Chat message.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with the given configuration.
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
    /// Reads `FRACTAL_API_KEY`/`OPENAI_API_KEY` and optionally `FRACTAL_MODEL`.
    pub fn from_env() -> Result<Self> {
        let config = ProviderConfig::from_env()?;
        Self::new(config)
    }

    /// Create a provider from environment with a specific model.
    pub fn from_env_with_model(model: &str) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| FractalError::Config("OPENAI_API_KEY not set".to_string()))?;

        Self::new(ProviderConfig::new(api_key, model))
    }
}

#[async_trait]
impl CodeProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        debug!(model = %self.config.model, "requesting completion from OpenAI");

        let api_request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: params.max_output_tokens,
            temperature: params.temperature,
        };

        let url = self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
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

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        Ok(chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default())
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get("https://api.openai.com/v1/models")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send()
            .await
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        let config = ProviderConfig::new("test-key", "gpt-5-mini")
            .with_base_url(format!("{}/v1/chat/completions", server.uri()));
        OpenAiProvider::new(config).unwrap()
    }

    #[tokio::test]
    async fn complete_parses_the_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "const Component = () => null;" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let out = provider
            .complete("prompt", &SamplingParams::default())
            .await
            .unwrap();
        assert_eq!(out, "const Component = () => null;");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string("{\"error\": \"rate limited\"}"),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .complete("prompt", &SamplingParams::default())
            .await
            .unwrap_err();
        match err {
            FractalError::Upstream(msg) => assert!(msg.contains("429")),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_choices_yield_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let out = provider
            .complete("prompt", &SamplingParams::default())
            .await
            .unwrap();
        assert!(out.is_empty());
    }
}
