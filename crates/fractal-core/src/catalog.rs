//! Built-in template catalog.
//!
//! Pre-made component prompts users can start from. Entries are explicit
//! tagged records with all fields required.

use serde::{Deserialize, Serialize};

/// A pre-made prompt in the template catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    /// Stable identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short blurb shown in the catalog.
    pub description: String,

    /// Grouping category.
    pub category: String,

    /// The full description fed to the generation client.
    pub prompt: String,

    /// Emoji thumbnail.
    pub preview: String,
}

impl TemplateEntry {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        category: &str,
        prompt: &str,
        preview: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            prompt: prompt.to_string(),
            preview: preview.to_string(),
        }
    }
}

/// The built-in catalog.
pub fn builtin() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry::new(
            "button",
            "Modern Button",
            "Stylish button with animations",
            "components",
            "Create a modern button component with hover animations, multiple variants \
             (primary, secondary, outline), different sizes, and loading states",
            "\u{1F518}",
        ),
        TemplateEntry::new(
            "card",
            "Product Card",
            "E-commerce style card",
            "components",
            "Design a product card with image, title, price, rating stars, and add to cart \
             button with smooth hover effects",
            "\u{1F0CF}",
        ),
        TemplateEntry::new(
            "form",
            "Contact Form",
            "Beautiful contact form",
            "forms",
            "Create a contact form with name, email, message fields, validation states, and a \
             modern design with proper spacing",
            "\u{1F4DD}",
        ),
        TemplateEntry::new(
            "navbar",
            "Navigation Bar",
            "Responsive navbar",
            "layout",
            "Build a responsive navigation bar with logo, menu items, mobile hamburger menu, \
             and smooth animations",
            "\u{1F9ED}",
        ),
        TemplateEntry::new(
            "hero",
            "Hero Section",
            "Landing page hero",
            "layout",
            "Design a hero section with gradient background, compelling headline, subtitle, \
             CTA buttons, and hero image",
            "\u{1F680}",
        ),
        TemplateEntry::new(
            "dashboard",
            "Dashboard Widget",
            "Analytics dashboard card",
            "data",
            "Create a dashboard widget showing metrics with charts, trend indicators, and \
             clean data visualization",
            "\u{1F4CA}",
        ),
    ]
}

/// Look up a built-in entry by id.
pub fn find(id: &str) -> Option<TemplateEntry> {
    builtin().into_iter().find(|entry| entry.id == id)
}
