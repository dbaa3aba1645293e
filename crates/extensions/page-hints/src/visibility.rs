//! Selection of elements that are interactive and currently visible.

use voxnav_protocols::PageError;

use crate::dom::{Document, ElementSnapshot, ViewportInfo};

/// CSS selectors for elements a user can activate.
pub const INTERACTIVE_SELECTORS: &[&str] = &[
    "a[href]",
    "button",
    r#"input[type="button"]"#,
    r#"input[type="submit"]"#,
    r#"input[type="reset"]"#,
    r#"[role="button"]"#,
    "[onclick]",
    "select",
    "textarea",
    r#"input[type="text"]"#,
    r#"input[type="search"]"#,
    r#"input[type="email"]"#,
    r#"input[type="password"]"#,
    r#"[tabindex]:not([tabindex="-1"])"#,
];

const CLICKABLE_INPUT_TYPES: &[&str] = &[
    "button", "submit", "reset", "text", "search", "email", "password",
];

/// The union of [`INTERACTIVE_SELECTORS`] as a single selector list.
pub fn interactive_selector() -> String {
    INTERACTIVE_SELECTORS.join(", ")
}

/// Re-check of [`INTERACTIVE_SELECTORS`] against a snapshot.
///
/// A tabindex counts only when it parses as a non-negative integer.
pub fn is_interactive(element: &ElementSnapshot) -> bool {
    let attrs = &element.attributes;

    let by_tag = match element.tag_name.as_str() {
        "a" => attrs.href.is_some(),
        "button" | "select" | "textarea" => true,
        "input" => attrs
            .r#type
            .as_deref()
            .map(|t| CLICKABLE_INPUT_TYPES.contains(&t.trim().to_ascii_lowercase().as_str()))
            .unwrap_or(false),
        _ => false,
    };

    by_tag
        || attrs.role.as_deref() == Some("button")
        || attrs.onclick.is_some()
        || attrs
            .tabindex
            .as_deref()
            .and_then(|t| t.trim().parse::<i64>().ok())
            .is_some_and(|t| t >= 0)
}

/// Filters snapshots down to elements worth labeling.
pub struct VisibilityFilter;

impl VisibilityFilter {
    /// Positive area, overlapping the viewport, and not hidden by style.
    pub fn is_visible(element: &ElementSnapshot, viewport: &ViewportInfo) -> bool {
        element.bounding_box.has_area()
            && element.bounding_box.is_visible_in_viewport(viewport)
            && !element.style.is_hidden()
    }

    /// Keeps interactive, visible elements in their original order.
    pub fn filter(elements: Vec<ElementSnapshot>, viewport: &ViewportInfo) -> Vec<ElementSnapshot> {
        elements
            .into_iter()
            .filter(|e| is_interactive(e) && Self::is_visible(e, viewport))
            .collect()
    }

    /// Query `document` and filter the result.
    pub async fn visible_elements(
        document: &dyn Document,
    ) -> Result<Vec<ElementSnapshot>, PageError> {
        let viewport = document.viewport().await?;
        let elements = document.query_elements(&interactive_selector()).await?;
        let total = elements.len();
        let visible = Self::filter(elements, &viewport);
        tracing::debug!(total, visible = visible.len(), "Filtered interactive elements");
        Ok(visible)
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
