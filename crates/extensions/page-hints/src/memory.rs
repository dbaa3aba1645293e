//! In-memory [`Document`] for tests and headless embedding.

use async_trait::async_trait;
use parking_lot::Mutex;

use voxnav_protocols::PageError;

use crate::dom::{
    BoundingBox, Document, ElementSnapshot, HintMarker, NodeAttributes, NodeId, Scroll,
    ScrollTarget, ViewportInfo,
};

#[derive(Debug, Default)]
struct MemoryState {
    viewport: ViewportInfo,
    scroll_height: f64,
    elements: Vec<ElementSnapshot>,
    next_node: u64,
    overlays: Vec<Vec<HintMarker>>,
    activations: Vec<NodeId>,
    scrolls: Vec<Scroll>,
}

/// A page held entirely in memory.
///
/// Every mounted overlay is kept until unmounted, so a leaked overlay shows up
/// as `overlay_count() > 1`.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    state: Mutex<MemoryState>,
}

impl MemoryDocument {
    pub fn new(viewport: ViewportInfo) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                viewport,
                scroll_height: viewport.height as f64,
                ..Default::default()
            }),
        }
    }

    pub fn with_scroll_height(self, height: f64) -> Self {
        self.state.lock().scroll_height = height;
        self
    }

    /// Append an element and return its handle.
    pub fn add_element(
        &self,
        tag_name: &str,
        attributes: NodeAttributes,
        bounding_box: BoundingBox,
    ) -> NodeId {
        let mut state = self.state.lock();
        state.next_node += 1;
        let node = NodeId(state.next_node);
        state
            .elements
            .push(ElementSnapshot::new(node, tag_name, bounding_box).with_attributes(attributes));
        node
    }

    pub fn add_button(&self, bounding_box: BoundingBox) -> NodeId {
        self.add_element("button", NodeAttributes::default(), bounding_box)
    }

    /// Set computed style on an existing element.
    pub fn set_style(&self, node: NodeId, visibility: &str, display: &str) {
        let mut state = self.state.lock();
        if let Some(el) = state.elements.iter_mut().find(|e| e.node == node) {
            el.style.visibility = visibility.to_string();
            el.style.display = display.to_string();
        }
    }

    /// Detach an element; its handle goes stale.
    pub fn remove_element(&self, node: NodeId) {
        self.state.lock().elements.retain(|e| e.node != node);
    }

    pub fn overlay_count(&self) -> usize {
        self.state.lock().overlays.len()
    }

    /// Markers of the most recently mounted overlay.
    pub fn overlay_markers(&self) -> Vec<HintMarker> {
        self.state.lock().overlays.last().cloned().unwrap_or_default()
    }

    pub fn activations(&self) -> Vec<NodeId> {
        self.state.lock().activations.clone()
    }

    pub fn scrolls(&self) -> Vec<Scroll> {
        self.state.lock().scrolls.clone()
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.lock().viewport.scroll_y
    }
}

#[async_trait]
impl Document for MemoryDocument {
    async fn viewport(&self) -> Result<ViewportInfo, PageError> {
        Ok(self.state.lock().viewport)
    }

    async fn query_elements(&self, _selector: &str) -> Result<Vec<ElementSnapshot>, PageError> {
        Ok(self.state.lock().elements.clone())
    }

    async fn activate(&self, node: NodeId) -> Result<(), PageError> {
        let mut state = self.state.lock();
        if !state.elements.iter().any(|e| e.node == node) {
            return Err(PageError::StaleElement(node.0));
        }
        state.activations.push(node);
        Ok(())
    }

    async fn mount_overlay(&self, markers: &[HintMarker]) -> Result<(), PageError> {
        self.state.lock().overlays.push(markers.to_vec());
        Ok(())
    }

    async fn unmount_overlay(&self) -> Result<(), PageError> {
        self.state.lock().overlays.pop();
        Ok(())
    }

    async fn scroll(&self, scroll: Scroll) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let max = (state.scroll_height - state.viewport.height as f64).max(0.0);
        let target = match scroll.target {
            ScrollTarget::By(dy) => state.viewport.scroll_y + dy,
            ScrollTarget::Top => 0.0,
            ScrollTarget::Bottom => state.scroll_height,
        };
        state.viewport.scroll_y = target.clamp(0.0, max);
        state.scrolls.push(scroll);
        Ok(())
    }
}
