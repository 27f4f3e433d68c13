//! Error types for Fractal UI.

use thiserror::Error;

/// Result type alias for Fractal operations.
pub type Result<T> = std::result::Result<T, FractalError>;

/// Main error type for the Fractal pipeline.
///
/// Render faults inside the preview sandbox are deliberately absent here:
/// they are converted into an in-frame error panel by the sandbox document
/// and never surface as host-side errors.
#[derive(Debug, Error)]
pub enum FractalError {
    /// The caller supplied an unusable request (e.g. empty description).
    /// No upstream call is made for this class of error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A generation is already outstanding. Only one upstream call may be
    /// in flight at a time.
    #[error("A generation is already in progress")]
    Busy,

    /// The provider or the network between us and it failed, or the
    /// provider answered with a non-success status.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The provider answered successfully but the payload was blank.
    #[error("Provider returned an empty result")]
    EmptyResult,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Project store operation failed.
    #[error("Store error: {0}")]
    Store(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FractalError {
    /// A short message suitable for showing directly to the user,
    /// as opposed to the diagnostic `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            FractalError::InvalidInput(msg) => msg.clone(),
            FractalError::Busy => "A generation is already in progress. Please wait.".to_string(),
            FractalError::Upstream(_) => {
                "Failed to generate code. Please check your connection and try again.".to_string()
            }
            FractalError::EmptyResult => {
                "The model returned no code. Try rephrasing your description.".to_string()
            }
            FractalError::Config(msg) => msg.clone(),
            FractalError::Store(_) | FractalError::Io(_) | FractalError::Json(_) => {
                "Could not access saved projects. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_not_a_debug_dump() {
        let err = FractalError::Upstream("API error 500: boom".to_string());
        let msg = err.user_message();
        assert!(!msg.contains("500"));
        assert!(msg.contains("try again"));
    }

    #[test]
    fn invalid_input_keeps_caller_facing_text() {
        let err = FractalError::InvalidInput("Description is required".to_string());
        assert_eq!(err.user_message(), "Description is required");
    }
}
