//! Code provider trait and configuration.
//!
//! Defines the interface that text-generation backends must implement.

use crate::prompt::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplingParams {
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,

    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl SamplingParams {
    /// Set the temperature, clamped to the valid range.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp.clamp(0.0, 2.0);
        self
    }

    /// Set the output token budget.
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }
}

/// Configuration for a hosted provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Model identifier (e.g., "gpt-5-mini", "claude-sonnet-4-5").
    pub model: String,

    /// Base URL override for the API.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl ProviderConfig {
    /// Create a new provider config with API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout_seconds: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Load config from environment variables.
    ///
    /// Expected variables:
    /// - `FRACTAL_API_KEY` or `OPENAI_API_KEY`
    /// - `FRACTAL_MODEL` (defaults to "gpt-5-mini")
    /// - `FRACTAL_BASE_URL` (optional)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FRACTAL_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                crate::FractalError::Config(
                    "FRACTAL_API_KEY or OPENAI_API_KEY must be set".to_string(),
                )
            })?;

        let model = std::env::var("FRACTAL_MODEL").unwrap_or_else(|_| "gpt-5-mini".to_string());

        let mut config = Self::new(api_key, model);

        if let Ok(url) = std::env::var("FRACTAL_BASE_URL") {
            config = config.with_base_url(url);
        }

        Ok(config)
    }
}

/// Trait that text-generation backends must implement.
///
/// The capability is deliberately narrow: one prompt in, one raw text out.
/// Sanitization, emptiness checks and prompting all live on the caller's
/// side of this seam.
#[async_trait]
pub trait CodeProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Run a single best-effort completion.
    ///
    /// Implementations must not retry internally; the caller owns the
    /// decision to re-invoke.
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String>;

    /// Check if the provider is available and configured correctly.
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

/// A mock provider for testing.
///
/// Returns a canned response and counts how many calls were issued, which
/// is what most pipeline tests actually assert on.
#[derive(Debug, Default)]
pub struct MockProvider {
    response: String,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockProvider {
    /// Create a mock that answers with the given text.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of `complete` calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _prompt: &str, _params: &SamplingParams) -> Result<String> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_counts_calls() {
        let provider = MockProvider::new("const Component = () => null;");

        let params = SamplingParams::default();
        let out = provider.complete("prompt", &params).await.unwrap();
        assert_eq!(out, "const Component = () => null;");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn sampling_params_clamp_temperature() {
        let params = SamplingParams::default().with_temperature(5.0);
        assert_eq!(params.temperature, 2.0);
    }

    #[test]
    fn sampling_defaults_match_budget() {
        let params = SamplingParams::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.max_output_tokens, 2000);
    }
}
