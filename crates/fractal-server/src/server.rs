//! Router and handlers for the Fractal UI surface.

use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use fractal_core::catalog::{self, TemplateEntry};
use fractal_core::{
    CodeProvider, FractalError, GenerationRequest, ProjectRecord, ProjectStore, Studio,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state behind every handler.
pub struct AppState<P: CodeProvider> {
    pub studio: Arc<Studio<P>>,
    pub store: Arc<ProjectStore>,
}

impl<P: CodeProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            studio: Arc::clone(&self.studio),
            store: Arc::clone(&self.store),
        }
    }
}

impl<P: CodeProvider> AppState<P> {
    pub fn new(studio: Studio<P>, store: ProjectStore) -> Self {
        Self {
            studio: Arc::new(studio),
            store: Arc::new(store),
        }
    }
}

/// Build the application router.
pub fn router<P: CodeProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/generate", post(generate))
        .route("/api/templates", get(list_templates))
        .route("/api/projects", get(list_projects).post(save_project))
        .route("/api/projects/:id", axum::routing::delete(delete_project))
        .route("/api/projects/:id/load", post(load_project))
        .route("/preview", get(current_preview))
        .route("/preview/:id", get(preview_frame))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Install the global fmt subscriber so library `tracing` events reach
/// stderr. Returns false when a subscriber was already installed, in which
/// case that one stays in place.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt().try_init().is_ok()
}

/// Bind and serve until shutdown.
pub async fn start<P: CodeProvider + 'static>(
    state: AppState<P>,
    port: u16,
) -> std::io::Result<()> {
    init_tracing();
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Fractal UI available at http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Wire body of `POST /api/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    description: String,
    requester_id: Option<String>,
}

/// Wire response of `POST /api/generate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    code: String,
    preview_path: String,
}

async fn generate<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let mut request = GenerationRequest::new(body.description)?;
    if let Some(requester) = body.requester_id {
        request = request.with_requester(requester);
    }

    let outcome = state.studio.generate(request).await?;
    Ok(Json(GenerateResponse {
        code: outcome.source_text,
        preview_path: outcome.preview_path,
    }))
}

async fn list_templates() -> Json<Vec<TemplateEntry>> {
    Json(catalog::builtin())
}

async fn list_projects<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
) -> Result<Json<Vec<ProjectRecord>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// Wire body of `POST /api/projects`. Saving an existing id replaces the
/// whole record; omitting the id creates a new one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveProjectBody {
    id: Option<String>,
    title: Option<String>,
    description: String,
    source_text: String,
}

async fn save_project<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
    Json(body): Json<SaveProjectBody>,
) -> Result<Json<ProjectRecord>, ApiError> {
    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled project".to_string());

    let mut record = ProjectRecord::new(title, body.description, body.source_text);
    if let Some(id) = body.id {
        record = record.with_id(id);
    }

    let saved = state.store.save(record).await?;
    Ok(Json(saved))
}

async fn delete_project<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError(FractalError::InvalidInput(format!(
            "No project with id {}",
            id
        ))))
    }
}

/// Wire response for loading a saved project back into the preview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadProjectResponse {
    code: String,
    description: String,
    preview_path: String,
}

async fn load_project<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<Json<LoadProjectResponse>, ApiError> {
    let record = state.store.get(&id).await?.ok_or_else(|| {
        ApiError(FractalError::InvalidInput(format!(
            "No project with id {}",
            id
        )))
    })?;

    let outcome = state
        .studio
        .render_saved(&record.description, &record.source_text);

    Ok(Json(LoadProjectResponse {
        code: outcome.source_text,
        description: record.description,
        preview_path: outcome.preview_path,
    }))
}

async fn preview_frame<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.studio.preview().document(&id) {
        Some(doc) => Html(doc.html().to_string()).into_response(),
        None => (StatusCode::NOT_FOUND, "Preview expired").into_response(),
    }
}

async fn current_preview<P: CodeProvider + 'static>(
    State(state): State<AppState<P>>,
) -> impl IntoResponse {
    let document = state
        .studio
        .preview()
        .current()
        .and_then(|handle| state.studio.preview().document(handle.id()));

    match document {
        Some(doc) => Html(doc.html().to_string()).into_response(),
        None => (StatusCode::NOT_FOUND, "Nothing rendered yet").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal_core::provider::MockProvider;
    use fractal_core::GenerationClient;
    use tempfile::tempdir;

    fn state_with(
        response: &str,
        dir: &tempfile::TempDir,
    ) -> AppState<MockProvider> {
        let studio = Studio::new(GenerationClient::new(MockProvider::new(response)));
        let store = ProjectStore::new(dir.path().join("projects.json"));
        AppState::new(studio, store)
    }

    #[tokio::test]
    async fn generate_returns_code_and_preview_path() {
        let dir = tempdir().unwrap();
        let state = state_with("```jsx\nconst Component = () => null;\n```", &dir);

        let response = generate(
            State(state.clone()),
            Json(GenerateBody {
                description: "a button".to_string(),
                requester_id: Some("demo-user".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.code, "const Component = () => null;");
        assert!(response.0.preview_path.starts_with("/preview/"));

        // The frame the response points at is actually live.
        let id = response.0.preview_path.trim_start_matches("/preview/");
        assert!(state.studio.preview().document(id).is_some());
    }

    #[tokio::test]
    async fn generate_rejects_blank_descriptions() {
        let dir = tempdir().unwrap();
        let state = state_with("unused", &dir);

        let err = generate(
            State(state),
            Json(GenerateBody {
                description: "   ".to_string(),
                requester_id: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err.0, FractalError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn save_load_delete_round_trip() {
        let dir = tempdir().unwrap();
        let state = state_with("unused", &dir);

        let saved = save_project(
            State(state.clone()),
            Json(SaveProjectBody {
                id: None,
                title: Some("Card".to_string()),
                description: "a card".to_string(),
                source_text: "const Component = () => 'card';".to_string(),
            }),
        )
        .await
        .unwrap();

        let loaded = load_project(State(state.clone()), Path(saved.0.id.clone()))
            .await
            .unwrap();
        assert_eq!(loaded.0.code, "const Component = () => 'card';");
        assert!(loaded.0.preview_path.starts_with("/preview/"));

        let status = delete_project(State(state.clone()), Path(saved.0.id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert!(state.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_project_is_an_input_error() {
        let dir = tempdir().unwrap();
        let state = state_with("unused", &dir);

        let err = delete_project(State(state), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err.0, FractalError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn templates_endpoint_serves_the_builtin_catalog() {
        let templates = list_templates().await;
        assert_eq!(templates.0.len(), 6);
    }

    #[test]
    fn init_tracing_installs_a_subscriber_exactly_once() {
        // First call may race with nothing else in this crate; once a
        // subscriber is installed, further calls must leave it in place.
        init_tracing();
        assert!(!init_tracing());
    }
}
