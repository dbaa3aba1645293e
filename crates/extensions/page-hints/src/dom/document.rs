//! The page-side collaborator of the hint engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voxnav_protocols::PageError;

use super::dom_types::{BoundingBox, ViewportInfo};
use super::element::{ElementSnapshot, NodeId};

/// One overlay marker: a label drawn at an element's box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintMarker {
    pub label: String,
    pub node: NodeId,
    pub bounding_box: BoundingBox,
}

/// Where a scroll goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "delta", rename_all = "lowercase")]
pub enum ScrollTarget {
    /// Relative vertical scroll in CSS pixels (negative is up).
    By(f64),
    Top,
    /// The document's full scroll height.
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub target: ScrollTarget,
    pub smooth: bool,
}

/// Access to a live page.
#[async_trait]
pub trait Document: Send + Sync {
    async fn viewport(&self) -> Result<ViewportInfo, PageError>;

    /// Elements matching a CSS selector, in document order.
    ///
    /// Implementations may return a superset of the selector's matches. Each call
    /// re-registers node handles; handles from an earlier call may go stale.
    async fn query_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>, PageError>;

    /// Primary activation of an element, equivalent to a user click.
    async fn activate(&self, node: NodeId) -> Result<(), PageError>;

    /// Draw the hint overlay (a fixed, top-most, pointer-transparent container).
    async fn mount_overlay(&self, markers: &[HintMarker]) -> Result<(), PageError>;

    /// Remove the hint overlay; no-op when none is mounted.
    async fn unmount_overlay(&self) -> Result<(), PageError>;

    async fn scroll(&self, scroll: Scroll) -> Result<(), PageError>;
}
