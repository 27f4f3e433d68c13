//! Ollama local provider implementation.
//!
//! Runs against a local Ollama daemon; useful for development without an
//! API key.

use async_trait::async_trait;
use fractal_core::{CodeProvider, FractalError, Result, SamplingParams};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";

/// Ollama provider for local code generation.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    model: String,
    base_url: String,
}

/// Ollama generate request.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama generate response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the given model.
    pub fn new(model: impl Into<String>) -> Result<Self> {
        Self::with_options(model, DEFAULT_OLLAMA_URL)
    }

    /// Create a provider with a custom URL.
    pub fn with_options(model: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        // Local models can be slow.
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    /// Create from environment variables.
    ///
    /// Reads `OLLAMA_MODEL` and optionally `OLLAMA_URL`.
    pub fn from_env() -> Result<Self> {
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "codellama".to_string());
        let url = std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        Self::with_options(model, url)
    }
}

#[async_trait]
impl CodeProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        debug!(model = %self.model, "requesting completion from Ollama");

        let api_request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: params.temperature,
                num_predict: params.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FractalError::Upstream(format!(
                "Ollama error {}: {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FractalError::Upstream(e.to_string()))?;

        Ok(gen_response.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn complete_returns_the_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "const Component = () => null;",
                "done": true
            })))
            .mount(&server)
            .await;

        let provider =
            OllamaProvider::with_options("codellama", format!("{}/api/generate", server.uri()))
                .unwrap();

        let out = provider
            .complete("prompt", &SamplingParams::default())
            .await
            .unwrap();
        assert_eq!(out, "const Component = () => null;");
    }
}
