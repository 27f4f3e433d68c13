//! # Fractal AI
//!
//! Provider implementations for the Fractal UI generation pipeline.
//!
//! This crate provides ready-to-use text-generation backends:
//!
//! - **OpenAI**: chat completions and compatible endpoints
//! - **Anthropic**: Claude models
//! - **Ollama**: local models, no API key required
//!
//! ## Example
//!
//! ```rust,ignore
//! use fractal_ai::OpenAiProvider;
//! use fractal_core::{GenerationClient, GenerationRequest};
//!
//! let client = GenerationClient::new(OpenAiProvider::from_env()?);
//! let source = client
//!     .generate(&GenerationRequest::new("a gradient call-to-action button")?)
//!     .await?;
//! ```

pub mod anthropic;
pub mod ollama;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Re-export core types for convenience.
pub use fractal_core::{
    CodeProvider, FractalError, GenerationClient, GenerationRequest, ProviderConfig, Result,
    SamplingParams, Studio,
};

use async_trait::async_trait;

/// A provider chosen at runtime.
///
/// The server and CLI pick a backend from configuration; this enum keeps
/// the rest of the pipeline monomorphic over a single concrete type.
#[derive(Debug)]
pub enum AnyProvider {
    OpenAi(OpenAiProvider),
    Anthropic(AnthropicProvider),
    Ollama(OllamaProvider),
}

#[async_trait]
impl CodeProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            AnyProvider::OpenAi(p) => p.name(),
            AnyProvider::Anthropic(p) => p.name(),
            AnyProvider::Ollama(p) => p.name(),
        }
    }

    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        match self {
            AnyProvider::OpenAi(p) => p.complete(prompt, params).await,
            AnyProvider::Anthropic(p) => p.complete(prompt, params).await,
            AnyProvider::Ollama(p) => p.complete(prompt, params).await,
        }
    }

    async fn health_check(&self) -> Result<bool> {
        match self {
            AnyProvider::OpenAi(p) => p.health_check().await,
            AnyProvider::Anthropic(p) => p.health_check().await,
            AnyProvider::Ollama(p) => p.health_check().await,
        }
    }
}

/// Build a provider by name, honoring an optional model override.
///
/// Recognized names: "openai", "anthropic", "ollama".
pub fn provider_for(name: &str, model: Option<&str>) -> Result<AnyProvider> {
    match name {
        "openai" => {
            let provider = match model {
                Some(m) => OpenAiProvider::from_env_with_model(m)?,
                None => OpenAiProvider::from_env()?,
            };
            Ok(AnyProvider::OpenAi(provider))
        }
        "anthropic" => {
            let provider = match model {
                Some(m) => AnthropicProvider::from_env_with_model(m)?,
                None => AnthropicProvider::from_env()?,
            };
            Ok(AnyProvider::Anthropic(provider))
        }
        "ollama" => {
            let provider = match model {
                Some(m) => OllamaProvider::new(m)?,
                None => OllamaProvider::from_env()?,
            };
            Ok(AnyProvider::Ollama(provider))
        }
        other => Err(FractalError::Config(format!(
            "Unknown provider '{}' (expected openai, anthropic or ollama)",
            other
        ))),
    }
}

/// Create an OpenAI provider with a single line.
///
/// # Example
///
/// ```rust,ignore
/// let provider = fractal_ai::openai("gpt-5-mini")?;
/// ```
pub fn openai(model: &str) -> Result<OpenAiProvider> {
    OpenAiProvider::from_env_with_model(model)
}

/// Create an Anthropic provider with a single line.
pub fn anthropic(model: &str) -> Result<AnthropicProvider> {
    AnthropicProvider::from_env_with_model(model)
}

/// Create an Ollama provider with a single line.
pub fn ollama(model: &str) -> Result<OllamaProvider> {
    OllamaProvider::new(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_name_is_a_config_error() {
        let err = provider_for("grok", None).unwrap_err();
        assert!(matches!(err, FractalError::Config(_)));
    }

    #[test]
    fn ollama_selection_needs_no_api_key() {
        let provider = provider_for("ollama", Some("codellama")).unwrap();
        assert_eq!(provider.name(), "ollama");
    }
}
