//! Hint sessions: label visible elements, draw the overlay, activate by label.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use voxnav_protocols::PageError;

use crate::dom::{BoundingBox, Document, ElementSnapshot, HintMarker, NodeId};
use crate::label::{hint_label, normalize_label};
use crate::visibility::VisibilityFilter;

/// Index into a session's element arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

impl ElementRef {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HintEntry {
    pub label: String,
    pub element: ElementRef,
    pub bounding_box: BoundingBox,
}

/// Labels assigned by one `show`, valid until the next `show` or `hide`.
#[derive(Debug, Default)]
pub struct HintSession {
    arena: Vec<NodeId>,
    entries: Vec<HintEntry>,
    lookup: HashMap<String, ElementRef>,
}

impl HintSession {
    /// Label `elements` in order, starting from `A`.
    pub fn build(elements: Vec<ElementSnapshot>) -> Self {
        let mut session = Self {
            arena: Vec::with_capacity(elements.len()),
            entries: Vec::with_capacity(elements.len()),
            lookup: HashMap::with_capacity(elements.len()),
        };

        for (index, element) in elements.into_iter().enumerate() {
            let label = hint_label(index);
            let element_ref = ElementRef(session.arena.len());
            session.arena.push(element.node);
            session.lookup.insert(normalize_label(&label), element_ref);
            session.entries.push(HintEntry {
                label,
                element: element_ref,
                bounding_box: element.bounding_box,
            });
        }

        session
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HintEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Node behind a spoken label, matched after normalization.
    pub fn resolve(&self, label: &str) -> Option<NodeId> {
        self.lookup
            .get(&normalize_label(label))
            .and_then(|r| self.arena.get(r.0))
            .copied()
    }

    pub fn markers(&self) -> Vec<HintMarker> {
        self.entries
            .iter()
            .map(|e| HintMarker {
                label: e.label.clone(),
                node: self.arena[e.element.0],
                bounding_box: e.bounding_box,
            })
            .collect()
    }
}

/// Result of a hint click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    Activated { label: String },
    NotFound { label: String },
}

impl HintOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Activated { .. })
    }
}

/// Owns at most one [`HintSession`] for a page.
pub struct HintEngine {
    document: Arc<dyn Document>,
    session: Mutex<Option<HintSession>>,
}

impl HintEngine {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self {
            document,
            session: Mutex::new(None),
        }
    }

    /// Replace any current session with a fresh one. Returns the hint count.
    pub async fn show(&self) -> Result<usize, PageError> {
        let mut slot = self.session.lock().await;
        self.teardown(&mut slot).await?;

        let visible = VisibilityFilter::visible_elements(self.document.as_ref()).await?;
        let session = HintSession::build(visible);

        if let Err(e) = self.document.mount_overlay(&session.markers()).await {
            // Drop whatever part of the overlay made it onto the page.
            let _ = self.document.unmount_overlay().await;
            return Err(e);
        }

        let count = session.len();
        info!(count, "Showing hints");
        *slot = Some(session);
        Ok(count)
    }

    /// Remove the overlay and forget the session; no-op when inactive.
    pub async fn hide(&self) -> Result<(), PageError> {
        let mut slot = self.session.lock().await;
        self.teardown(&mut slot).await
    }

    /// Activate the element labeled `label` in the current session.
    ///
    /// On a match the element is activated and the session ends, even when the
    /// activation itself fails. An unknown label leaves the session untouched.
    pub async fn resolve_and_activate(&self, label: &str) -> Result<HintOutcome, PageError> {
        let mut slot = self.session.lock().await;

        let Some(node) = slot.as_ref().and_then(|s| s.resolve(label)) else {
            warn!(label, "Hint not found");
            return Ok(HintOutcome::NotFound {
                label: label.to_string(),
            });
        };

        info!(label, node = node.0, "Activating hint");
        let activation = self.document.activate(node).await;
        let teardown = self.teardown(&mut slot).await;
        activation?;
        teardown?;

        Ok(HintOutcome::Activated {
            label: label.to_string(),
        })
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Labels of the current session, in assignment order.
    pub async fn active_labels(&self) -> Vec<String> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.labels().map(str::to_string).collect())
            .unwrap_or_default()
    }

    async fn teardown(&self, slot: &mut Option<HintSession>) -> Result<(), PageError> {
        if let Some(session) = slot.take() {
            debug!(count = session.len(), "Removing hints");
            self.document.unmount_overlay().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
