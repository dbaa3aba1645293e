//! Page structure seen by the hint engine.

mod document;
mod dom_types;
mod element;

pub use document::{Document, HintMarker, Scroll, ScrollTarget};
pub use dom_types::{BoundingBox, ViewportInfo};
pub use element::{ComputedVisibility, ElementSnapshot, NodeAttributes, NodeId};

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
