//! Page runtime for voxnav.
//!
//! Runs inside one page context and executes the page-level commands the content
//! bridge delivers: scrolling, and the hint system that lets a user pick an
//! on-screen interactive element by speaking its label.
//!
//! ## Hint pipeline
//!
//! ```text
//! Document ──► VisibilityFilter ──► hint_label(i) ──► HintSession ──► overlay
//!                                                        │
//!                     resolve_and_activate("ab") ◄───────┘
//! ```
//!
//! The page itself is reached through the [`Document`] trait so the engine runs
//! unchanged against a live browser page or the in-memory [`memory::MemoryDocument`].

mod dom;
mod engine;
mod label;
pub mod memory;
mod runtime;
mod visibility;

pub use dom::{
    BoundingBox, ComputedVisibility, Document, ElementSnapshot, HintMarker, NodeAttributes,
    NodeId, Scroll, ScrollTarget, ViewportInfo,
};
pub use engine::{ElementRef, HintEngine, HintEntry, HintOutcome, HintSession};
pub use label::{hint_label, label_index, normalize_label};
pub use runtime::{PageRuntime, ScrollSettings};
pub use visibility::{interactive_selector, is_interactive, VisibilityFilter, INTERACTIVE_SELECTORS};
