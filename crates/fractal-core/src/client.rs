//! Generation client: description in, sanitized component source out.

use crate::prompt::PromptTemplate;
use crate::provider::{CodeProvider, SamplingParams};
use crate::sanitize::sanitize;
use crate::{FractalError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A validated request for component generation.
///
/// Construction is the validation point: a `GenerationRequest` always holds
/// a non-empty, trimmed description. The fields are private and
/// deserialization funnels through [`GenerationRequest::new`], so no path
/// can produce an invalid one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "RawGenerationRequest")]
pub struct GenerationRequest {
    description: String,
    requester_id: Option<String>,
}

/// Unvalidated wire shape; converted via `TryFrom` during deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGenerationRequest {
    description: String,
    #[serde(default)]
    requester_id: Option<String>,
}

impl TryFrom<RawGenerationRequest> for GenerationRequest {
    type Error = FractalError;

    fn try_from(raw: RawGenerationRequest) -> Result<Self> {
        let mut request = GenerationRequest::new(raw.description)?;
        if let Some(id) = raw.requester_id {
            request = request.with_requester(id);
        }
        Ok(request)
    }
}

impl GenerationRequest {
    /// Create a request, trimming the description and rejecting blank input.
    pub fn new(description: impl Into<String>) -> Result<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(FractalError::InvalidInput(
                "Description is required".to_string(),
            ));
        }

        Ok(Self {
            description,
            requester_id: None,
        })
    }

    /// Attach an opaque requester identifier (used for logging only).
    pub fn with_requester(mut self, id: impl Into<String>) -> Self {
        self.requester_id = Some(id.into());
        self
    }

    /// The trimmed, non-empty description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The requester identifier, if any.
    pub fn requester_id(&self) -> Option<&str> {
        self.requester_id.as_deref()
    }
}

/// Client that turns a [`GenerationRequest`] into sanitized component source.
///
/// Each call is a single best-effort attempt: no retries, no internal
/// queueing. The caller decides whether to re-invoke on failure.
///
/// # Example
///
/// ```rust,ignore
/// use fractal_core::{GenerationClient, GenerationRequest};
/// use fractal_ai::OpenAiProvider;
///
/// let client = GenerationClient::new(OpenAiProvider::from_env()?);
/// let request = GenerationRequest::new("a pricing card with three tiers")?;
/// let source = client.generate(&request).await?;
/// ```
pub struct GenerationClient<P: CodeProvider> {
    /// The provider that performs the completion.
    provider: Arc<P>,

    /// Fixed instructional wrapper around the user description.
    template: PromptTemplate,

    /// Sampling parameters sent with every completion.
    sampling: SamplingParams,
}

impl<P: CodeProvider> GenerationClient<P> {
    /// Create a new client with the given provider and default prompt/sampling.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            template: PromptTemplate::default(),
            sampling: SamplingParams::default(),
        }
    }

    /// Override the prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Override the sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate sanitized component source for a request.
    ///
    /// Issues exactly one upstream call. Blank upstream output is an error
    /// ([`FractalError::EmptyResult`]), not something to render.
    #[instrument(skip(self, request), fields(requester = request.requester_id().unwrap_or("anonymous")))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            provider = self.provider.name(),
            "generating component source"
        );

        let prompt = self.template.compose(request.description());
        let raw = self.provider.complete(&prompt, &self.sampling).await?;

        let code = sanitize(&raw);
        if code.is_empty() {
            return Err(FractalError::EmptyResult);
        }

        info!(
            provider = self.provider.name(),
            chars = code.len(),
            "generated component source"
        );
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    #[test]
    fn empty_description_is_rejected_without_a_call() {
        let provider = MockProvider::new("unused");
        assert!(matches!(
            GenerationRequest::new(""),
            Err(FractalError::InvalidInput(_))
        ));
        assert!(matches!(
            GenerationRequest::new("   \n\t "),
            Err(FractalError::InvalidInput(_))
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn description_is_trimmed() {
        let request = GenerationRequest::new("  a login form  ").unwrap();
        assert_eq!(request.description(), "a login form");
    }

    #[test]
    fn deserialization_runs_the_same_validation() {
        // A blank description cannot sneak past the constructor via serde.
        let err = serde_json::from_str::<GenerationRequest>(r#"{"description":"   "}"#);
        assert!(err.is_err());

        let request: GenerationRequest =
            serde_json::from_str(r#"{"description":"  a button  ","requesterId":"u1"}"#).unwrap();
        assert_eq!(request.description(), "a button");
        assert_eq!(request.requester_id(), Some("u1"));
    }

    #[tokio::test]
    async fn generate_issues_exactly_one_upstream_call() {
        let client = GenerationClient::new(MockProvider::new("const Component = () => null;"));
        let request = GenerationRequest::new("a button").unwrap();

        let code = client.generate(&request).await.unwrap();
        assert_eq!(code, "const Component = () => null;");
        assert_eq!(client.provider().calls(), 1);
    }

    #[tokio::test]
    async fn generate_sanitizes_fenced_output() {
        let client =
            GenerationClient::new(MockProvider::new("```jsx\nconst Component = () => null;\n```"));
        let request = GenerationRequest::new("a button").unwrap();

        let code = client.generate(&request).await.unwrap();
        assert_eq!(code, "const Component = () => null;");
    }

    #[tokio::test]
    async fn blank_upstream_output_is_an_error() {
        let client = GenerationClient::new(MockProvider::new("   \n"));
        let request = GenerationRequest::new("a button").unwrap();

        assert!(matches!(
            client.generate(&request).await,
            Err(FractalError::EmptyResult)
        ));
        // The transport call did happen; emptiness is a post-transport failure.
        assert_eq!(client.provider().calls(), 1);
    }
}
