//! Studio - the owning controller for the prompt-to-render pipeline.
//!
//! All mutable state (the current component slot, the in-flight flag, the
//! preview host) lives here and is reached through accessor methods; there
//! are no ambient globals.

use crate::client::{GenerationClient, GenerationRequest};
use crate::preview::PreviewHost;
use crate::provider::CodeProvider;
use crate::{FractalError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tracing::{info, instrument};

/// The most recently generated component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedComponent {
    /// The description it was generated from.
    pub description: String,

    /// Sanitized component source.
    pub source_text: String,

    /// When the generation completed.
    pub generated_at: DateTime<Utc>,
}

/// Result of one successful pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// Sanitized component source.
    pub source_text: String,

    /// Locator of the live preview frame.
    pub preview_path: String,
}

/// Resets the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The main controller: one generation in flight at a time, one current
/// preview, last-write-wins.
///
/// # Example
///
/// ```rust,ignore
/// use fractal_core::{GenerationClient, GenerationRequest, Studio};
/// use fractal_ai::OpenAiProvider;
///
/// let studio = Studio::new(GenerationClient::new(OpenAiProvider::from_env()?));
/// let outcome = studio
///     .generate(GenerationRequest::new("a pricing table")?)
///     .await?;
/// println!("preview at {}", outcome.preview_path);
/// ```
pub struct Studio<P: CodeProvider> {
    client: GenerationClient<P>,
    preview: PreviewHost,
    current: RwLock<Option<GeneratedComponent>>,
    in_flight: AtomicBool,
}

impl<P: CodeProvider> Studio<P> {
    /// Create a studio around a generation client.
    pub fn new(client: GenerationClient<P>) -> Self {
        Self {
            client,
            preview: PreviewHost::new(),
            current: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The preview host (frame lookup for the HTTP surface).
    pub fn preview(&self) -> &PreviewHost {
        &self.preview
    }

    /// The generation client.
    pub fn client(&self) -> &GenerationClient<P> {
        &self.client
    }

    /// Whether a generation is currently outstanding.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The most recently generated component, if any.
    pub fn current(&self) -> Option<GeneratedComponent> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// Run the full pipeline: validate, generate, sanitize, render.
    ///
    /// Only one call may be outstanding; a concurrent second call fails
    /// fast with [`FractalError::Busy`] before any upstream call is made.
    /// The new preview fully supersedes the previous one.
    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(FractalError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let source_text = self.client.generate(&request).await?;
        let handle = self.preview.render(&source_text);

        let component = GeneratedComponent {
            description: request.description().to_string(),
            source_text: source_text.clone(),
            generated_at: Utc::now(),
        };
        if let Ok(mut current) = self.current.write() {
            *current = Some(component);
        }

        info!(preview = %handle.path(), "generation complete");
        Ok(GenerationOutcome {
            source_text,
            preview_path: handle.path(),
        })
    }

    /// Re-render a previously saved source without a new generation
    /// (loading a project back into the preview).
    pub fn render_saved(&self, description: &str, source_text: &str) -> GenerationOutcome {
        let handle = self.preview.render(source_text);

        if let Ok(mut current) = self.current.write() {
            *current = Some(GeneratedComponent {
                description: description.to_string(),
                source_text: source_text.to_string(),
                generated_at: Utc::now(),
            });
        }

        GenerationOutcome {
            source_text: source_text.to_string(),
            preview_path: handle.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockProvider, SamplingParams};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    /// Provider that blocks until released, for exercising the in-flight guard.
    struct GatedProvider {
        release: Arc<tokio::sync::Notify>,
        calls: AtomicUsize,
    }

    impl GatedProvider {
        fn new(release: Arc<tokio::sync::Notify>) -> Self {
            Self {
                release,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CodeProvider for GatedProvider {
        fn name(&self) -> &str {
            "gated"
        }

        async fn complete(&self, _prompt: &str, _params: &SamplingParams) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok("const Component = () => null;".to_string())
        }
    }

    #[tokio::test]
    async fn generate_updates_current_slot_and_preview() {
        let studio = Studio::new(GenerationClient::new(MockProvider::new(
            "const Component = () => null;",
        )));

        let outcome = studio
            .generate(GenerationRequest::new("a button").unwrap())
            .await
            .unwrap();

        assert_eq!(outcome.source_text, "const Component = () => null;");
        assert!(outcome.preview_path.starts_with("/preview/"));

        let current = studio.current().unwrap();
        assert_eq!(current.description, "a button");
        assert_eq!(current.source_text, "const Component = () => null;");
        assert_eq!(studio.preview().frame_count(), 1);
    }

    #[tokio::test]
    async fn second_generation_supersedes_the_first_preview() {
        let studio = Studio::new(GenerationClient::new(MockProvider::new(
            "const Component = () => null;",
        )));

        let first = studio
            .generate(GenerationRequest::new("one").unwrap())
            .await
            .unwrap();
        let second = studio
            .generate(GenerationRequest::new("two").unwrap())
            .await
            .unwrap();

        assert_ne!(first.preview_path, second.preview_path);
        assert_eq!(studio.preview().frame_count(), 1);
        let second_id = second.preview_path.trim_start_matches("/preview/");
        assert!(studio.preview().document(second_id).is_some());
    }

    #[tokio::test]
    async fn concurrent_generation_is_rejected_without_an_upstream_call() {
        let release = Arc::new(tokio::sync::Notify::new());
        let provider = GatedProvider::new(Arc::clone(&release));
        let studio = Arc::new(Studio::new(GenerationClient::new(provider)));

        let first = {
            let studio = Arc::clone(&studio);
            tokio::spawn(async move {
                studio
                    .generate(GenerationRequest::new("first").unwrap())
                    .await
            })
        };

        // Wait until the first call is inside the provider.
        while !studio.is_generating() {
            tokio::task::yield_now().await;
        }

        let second = studio
            .generate(GenerationRequest::new("second").unwrap())
            .await;
        assert!(matches!(second, Err(FractalError::Busy)));
        assert_eq!(studio.client().provider().calls.load(Ordering::SeqCst), 1);

        release.notify_one();
        assert!(first.await.unwrap().is_ok());

        // Guard released; a new generation may start.
        assert!(!studio.is_generating());
    }

    #[tokio::test]
    async fn failed_generation_releases_the_guard() {
        let studio = Studio::new(GenerationClient::new(MockProvider::new("")));

        let result = studio
            .generate(GenerationRequest::new("a button").unwrap())
            .await;
        assert!(matches!(result, Err(FractalError::EmptyResult)));
        assert!(!studio.is_generating());

        // And the next attempt is not blocked.
        let again = studio
            .generate(GenerationRequest::new("a button").unwrap())
            .await;
        assert!(matches!(again, Err(FractalError::EmptyResult)));
    }

    #[tokio::test]
    async fn render_saved_restores_a_project_into_the_preview() {
        let studio = Studio::new(GenerationClient::new(MockProvider::new("unused")));

        let outcome = studio.render_saved("a saved card", "const Component = () => 'card';");
        assert!(outcome.preview_path.starts_with("/preview/"));
        assert_eq!(
            studio.current().unwrap().description,
            "a saved card"
        );
        assert_eq!(studio.preview().frame_count(), 1);
    }
}
