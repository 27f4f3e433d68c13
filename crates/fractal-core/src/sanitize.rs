//! Sanitization of model output into renderable component source.
//!
//! Models frequently wrap code in markdown fences despite being told not to.
//! [`sanitize`] strips clearly-delimited leading/trailing fences and is
//! idempotent: applying it to already-clean source changes nothing.

use regex::Regex;
use std::sync::OnceLock;

/// Matches an opening fence line at the start of the text, with or without
/// a language tag, e.g. "```", "```jsx" or "```typescript".
const OPENING_FENCE_PATTERN: &str = r"^```[A-Za-z0-9_+.-]*[ \t]*\r?\n?";

static OPENING_FENCE: OnceLock<Regex> = OnceLock::new();

fn opening_fence() -> &'static Regex {
    OPENING_FENCE.get_or_init(|| {
        Regex::new(OPENING_FENCE_PATTERN).expect("Invalid opening fence pattern")
    })
}

/// Strip markdown code fences from generated source.
///
/// The strip is conservative: a fence is only removed when the trimmed text
/// *starts* with one; fences embedded in the middle of otherwise-clean text
/// are left alone. The single strip step runs to a fixpoint, which makes the
/// whole function idempotent by construction.
///
/// # Example
///
/// ```
/// use fractal_core::sanitize::sanitize;
///
/// let fenced = "```jsx\nconst Component = () => null;\n```";
/// assert_eq!(sanitize(fenced), "const Component = () => null;");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One conservative strip pass: remove the leading fence line if present,
/// then a bare trailing closing fence.
fn strip_once(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }

    let without_opening = opening_fence().replace(text, "");
    let mut body = without_opening.trim_end();
    if let Some(stripped) = body.strip_suffix("```") {
        body = stripped.trim_end();
    }
    body.trim().to_string()
}
