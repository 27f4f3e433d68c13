//! Prompt construction for component generation.
//!
//! The instructional wrapper is fixed: the user only ever supplies the
//! component description, and the template pins down the output contract
//! (functional component, Tailwind classes, the `Component` export, raw
//! code with no prose or fences).

/// The identifier the generated source must bind its component to.
/// The sandbox bootstrap looks this name up when mounting.
pub const COMPONENT_EXPORT: &str = "Component";

/// Mid-range sampling temperature balancing determinism and variety.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Output budget for a single component.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

/// Fixed instructional template wrapping a user description.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    preamble: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            preamble: format!(
                "You are an expert React developer. Generate a React component based on the \
                 following description.\n\n\
                 Requirements:\n\
                 - Use React functional components with hooks\n\
                 - Use Tailwind CSS for styling\n\
                 - Make it responsive and accessible\n\
                 - Include proper prop types if needed\n\
                 - Export the component as \"{COMPONENT_EXPORT}\"\n\
                 - Only return the JavaScript/JSX code, no markdown or explanations\n\
                 - Use modern React patterns"
            ),
        }
    }
}

impl PromptTemplate {
    /// Create the default component-generation template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the instructional preamble. The description interpolation
    /// and trailing instruction are not overridable.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// Compose the full prompt for a user description.
    pub fn compose(&self, description: &str) -> String {
        format!(
            "{}\n\nUser's request: {}\n\nGenerate the complete component code:",
            self.preamble, description
        )
    }
}
