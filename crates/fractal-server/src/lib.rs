//! # Fractal Server
//!
//! HTTP surface for Fractal UI. Exposes the generation pipeline, the
//! preview frames, the builtin template catalog, and the project store
//! over a small JSON API, plus the studio page at `/`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fractal_core::{GenerationClient, ProjectStore, Studio};
//! use fractal_server::{start, AppState};
//!
//! let provider = fractal_ai::OpenAiProvider::from_env()?;
//! let studio = Studio::new(GenerationClient::new(provider));
//! let store = ProjectStore::new("fractal-projects.json");
//! start(AppState::new(studio, store), 3000).await?;
//! ```

pub mod error;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use server::{init_tracing, router, start, AppState};
