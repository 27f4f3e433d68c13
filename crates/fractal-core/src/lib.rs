//! # Fractal Core
//!
//! Core library for AI-powered UI component generation.
//!
//! This crate provides the prompt-to-render pipeline: request validation,
//! prompt construction, output sanitization, sandboxed preview documents,
//! and project persistence.
//!
//! ## Features
//!
//! - Fixed instructional prompt template with a pinned output contract
//! - Idempotent markdown-fence sanitization
//! - Sandbox documents that contain untrusted code failures in-frame
//! - Single-flight generation guarded by an owning controller
//! - Extensible provider trait for text-generation backends
//!
//! ## Example
//!
//! ```rust,ignore
//! use fractal_core::{GenerationClient, GenerationRequest, Studio};
//! use fractal_ai::OpenAiProvider;
//!
//! let studio = Studio::new(GenerationClient::new(OpenAiProvider::from_env()?));
//! let outcome = studio
//!     .generate(GenerationRequest::new("a modern login form")?)
//!     .await?;
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod preview;
pub mod prompt;
pub mod provider;
pub mod sanitize;
pub mod sandbox;
pub mod store;
pub mod studio;

pub use client::{GenerationClient, GenerationRequest};
pub use config::FractalConfig;
pub use error::{FractalError, Result};
pub use preview::{PreviewHost, SandboxHandle};
pub use prompt::PromptTemplate;
pub use provider::{CodeProvider, ProviderConfig, SamplingParams};
pub use sandbox::SandboxDocument;
pub use store::{ProjectRecord, ProjectStore};
pub use studio::{GeneratedComponent, GenerationOutcome, Studio};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::{
        CodeProvider, FractalConfig, FractalError, GenerationClient, GenerationOutcome,
        GenerationRequest, ProjectRecord, ProjectStore, PromptTemplate, ProviderConfig, Result,
        SamplingParams, Studio,
    };
}
