//! Central configuration for the Fractal studio.
//!
//! Supports loading from environment variables and programmatic defaults.

use crate::provider::SamplingParams;
use std::env;
use std::path::PathBuf;

/// Top-level configuration.
///
/// # Example
/// ```rust
/// use fractal_core::FractalConfig;
///
/// // Load from environment
/// let config = FractalConfig::from_env();
///
/// // Or customize
/// let config = FractalConfig::default()
///     .with_port(8080)
///     .with_provider("anthropic");
/// ```
#[derive(Debug, Clone)]
pub struct FractalConfig {
    /// Port for the HTTP surface.
    /// Default: 3000, Env: FRACTAL_PORT=8080
    pub port: u16,

    /// Namespace file for the project store.
    /// Default: "fractal-projects.json", Env: FRACTAL_PROJECTS=path
    pub store_path: PathBuf,

    /// Provider name ("openai", "anthropic", "ollama").
    /// Default: "openai", Env: FRACTAL_PROVIDER=ollama
    pub provider: String,

    /// Model override. When unset the provider's default applies.
    /// Env: FRACTAL_MODEL=gpt-5-mini
    pub model: Option<String>,

    /// Sampling temperature.
    /// Default: 0.7, Env: FRACTAL_TEMPERATURE=0.4
    pub temperature: f32,

    /// Output token budget per generation.
    /// Default: 2000, Env: FRACTAL_MAX_TOKENS=4000
    pub max_output_tokens: u32,
}

impl Default for FractalConfig {
    fn default() -> Self {
        let sampling = SamplingParams::default();
        Self {
            port: 3000,
            store_path: PathBuf::from("fractal-projects.json"),
            provider: "openai".to_string(),
            model: None,
            temperature: sampling.temperature,
            max_output_tokens: sampling.max_output_tokens,
        }
    }
}

impl FractalConfig {
    /// Create a config from environment variables, falling back to
    /// defaults for missing variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = env::var("FRACTAL_PORT") {
            if let Ok(n) = v.parse() {
                config.port = n;
            }
        }
        if let Ok(v) = env::var("FRACTAL_PROJECTS") {
            config.store_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("FRACTAL_PROVIDER") {
            config.provider = v.to_lowercase();
        }
        if let Ok(v) = env::var("FRACTAL_MODEL") {
            config.model = Some(v);
        }
        if let Ok(v) = env::var("FRACTAL_TEMPERATURE") {
            if let Ok(n) = v.parse() {
                config.temperature = n;
            }
        }
        if let Ok(v) = env::var("FRACTAL_MAX_TOKENS") {
            if let Ok(n) = v.parse() {
                config.max_output_tokens = n;
            }
        }

        config
    }

    /// Builder: set the HTTP port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder: set the project store path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Builder: set the provider name.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Builder: set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// The sampling parameters this config describes.
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams::default()
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens)
    }
}
