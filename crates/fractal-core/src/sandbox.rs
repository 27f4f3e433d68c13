//! Sandbox document construction.
//!
//! Generated source is untrusted text. It is never evaluated in the host
//! process: [`SandboxDocument`] wraps it into a self-contained HTML document
//! whose embedded bootstrap mounts the component inside an isolated frame.
//! Every failure mode of the untrusted code resolves to something visible
//! *inside* that frame, never to a host-side fault.

use crate::prompt::COMPONENT_EXPORT;

/// Id of the mount node inside the sandbox document.
pub const MOUNT_ID: &str = "root";

/// Marker replaced with the untrusted source text.
const SOURCE_MARKER: &str = "__FRACTAL_SOURCE__";

/// Marker replaced with the expected component identifier.
const EXPORT_MARKER: &str = "__FRACTAL_EXPORT__";

/// Marker replaced with the mount node id.
const MOUNT_MARKER: &str = "__FRACTAL_MOUNT__";

/// The runtime document shell. Loads the rendering runtime (React UMD +
/// Babel standalone) and the utility styling engine (Tailwind CDN), then
/// runs the bootstrap:
///
/// 1. evaluates the embedded source verbatim,
/// 2. resolves the `Component` binding, substituting a "Component not found"
///    placeholder when the source never defined it,
/// 3. mounts inside a try/catch, and
/// 4. on any thrown error replaces the mount node with an error panel
///    carrying the message text.
const DOCUMENT_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Preview</title>
    <script src="https://unpkg.com/react@18/umd/react.development.js"></script>
    <script src="https://unpkg.com/react-dom@18/umd/react-dom.development.js"></script>
    <script src="https://unpkg.com/@babel/standalone/babel.min.js"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <script>
        tailwind.config = {
            theme: {
                extend: {
                    colors: {
                        primary: {
                            50: '#eff6ff',
                            500: '#3b82f6',
                            600: '#2563eb',
                            700: '#1d4ed8',
                        }
                    }
                }
            }
        }
    </script>
    <style>
        body {
            margin: 0;
            padding: 20px;
            font-family: system-ui, -apple-system, sans-serif;
            background: #ffffff;
        }
        .error {
            color: #ef4444;
            background: #fef2f2;
            padding: 12px;
            border-radius: 8px;
            border: 1px solid #fecaca;
        }
        .placeholder {
            color: #6b7280;
            padding: 12px;
        }
    </style>
</head>
<body>
    <div id="__FRACTAL_MOUNT__"></div>
    <script type="text/babel">
        try {
            __FRACTAL_SOURCE__

            const resolved = typeof __FRACTAL_EXPORT__ !== "undefined"
                ? __FRACTAL_EXPORT__
                : () => React.createElement("div", { className: "placeholder" }, "Component not found");
            const App = () => React.createElement(resolved);

            ReactDOM.render(React.createElement(App), document.getElementById("__FRACTAL_MOUNT__"));
        } catch (error) {
            document.getElementById("__FRACTAL_MOUNT__").innerHTML =
                '<div class="error"><strong>Preview Error:</strong><br/>' +
                String(error && error.message ? error.message : error) +
                '</div>';
        }
    </script>
</body>
</html>
"#;

/// A fully self-contained markup document embedding untrusted source.
///
/// Recreated on every generation, never mutated in place.
#[derive(Debug, Clone)]
pub struct SandboxDocument {
    html: String,
}

impl SandboxDocument {
    /// Build a sandbox document around the given source text.
    ///
    /// The source is embedded verbatim; the isolation boundary, not escaping,
    /// is what contains it.
    pub fn build(source: &str) -> Self {
        let html = DOCUMENT_SHELL
            .replace(MOUNT_MARKER, MOUNT_ID)
            .replace(EXPORT_MARKER, COMPONENT_EXPORT)
            .replace(SOURCE_MARKER, source);

        Self { html }
    }

    /// The complete document markup.
    pub fn html(&self) -> &str {
        &self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_source_verbatim() {
        let source = "const Component = () => <button className=\"px-4\">Hi</button>;";
        let doc = SandboxDocument::build(source);
        assert!(doc.html().contains(source));
    }

    #[test]
    fn declares_missing_component_placeholder() {
        let doc = SandboxDocument::build("const answer = 42;");
        assert!(doc.html().contains("typeof Component !== \"undefined\""));
        assert!(doc.html().contains("Component not found"));
    }

    #[test]
    fn guards_mount_with_error_panel() {
        let doc = SandboxDocument::build("throw new Error('boom');");
        let html = doc.html();
        assert!(html.contains("try {"));
        assert!(html.contains("catch (error)"));
        assert!(html.contains("Preview Error"));
        // The panel interpolates the thrown message, not a stack trace.
        assert!(html.contains("error.message"));
    }

    #[test]
    fn loads_runtime_and_styling_engine() {
        let doc = SandboxDocument::build("");
        let html = doc.html();
        assert!(html.contains("react@18"));
        assert!(html.contains("babel"));
        assert!(html.contains("tailwindcss"));
        assert!(html.contains(&format!("id=\"{}\"", MOUNT_ID)));
    }

    #[test]
    fn no_markers_survive_the_build() {
        let doc = SandboxDocument::build("const Component = () => null;");
        assert!(!doc.html().contains("__FRACTAL_"));
    }
}
