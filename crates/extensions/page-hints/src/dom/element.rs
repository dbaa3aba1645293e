//! Element snapshots reported by a [`Document`](super::Document).

use serde::{Deserialize, Serialize};

use super::dom_types::BoundingBox;

/// Page-assigned handle of an element.
///
/// Valid until the next [`Document::query_elements`](super::Document::query_elements)
/// call on the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Attributes the interactive predicate looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NodeAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Inline click handler source, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onclick: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabindex: Option<String>,
}

/// Computed style properties that hide an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedVisibility {
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default = "default_display")]
    pub display: String,
}

impl Default for ComputedVisibility {
    fn default() -> Self {
        Self {
            visibility: default_visibility(),
            display: default_display(),
        }
    }
}

fn default_visibility() -> String {
    "visible".to_string()
}

fn default_display() -> String {
    "block".to_string()
}

impl ComputedVisibility {
    pub fn is_hidden(&self) -> bool {
        self.visibility == "hidden" || self.display == "none"
    }
}

/// One element as seen at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub node: NodeId,
    /// Lowercase tag name.
    pub tag_name: String,
    #[serde(default)]
    pub attributes: NodeAttributes,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub style: ComputedVisibility,
}

impl ElementSnapshot {
    pub fn new(node: NodeId, tag_name: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            node,
            tag_name: tag_name.into().to_lowercase(),
            attributes: NodeAttributes::default(),
            bounding_box,
            style: ComputedVisibility::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: NodeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_style(mut self, visibility: &str, display: &str) -> Self {
        self.style = ComputedVisibility {
            visibility: visibility.to_string(),
            display: display.to_string(),
        };
        self
    }
}
