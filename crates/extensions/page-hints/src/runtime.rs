//! Page-level command handling for one page context.

use std::sync::Arc;

use tracing::{debug, error, warn};

use voxnav_protocols::command::string_arg;
use voxnav_protocols::{CommandArgs, PageCommand, PageError, PageRequest, PageResponse};

use crate::dom::{Document, Scroll, ScrollTarget};
use crate::engine::{HintEngine, HintOutcome};

/// Scroll distances used by the scroll commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    /// Pixels per `scroll_up` / `scroll_down`.
    pub line_step: f64,
    /// Fraction of the viewport height per `page_up` / `page_down`.
    pub page_fraction: f64,
    pub smooth: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            line_step: 100.0,
            page_fraction: 0.9,
            smooth: true,
        }
    }
}

/// The runtime that page requests are delivered to.
pub struct PageRuntime {
    document: Arc<dyn Document>,
    hints: HintEngine,
    scroll: ScrollSettings,
}

impl PageRuntime {
    pub fn new(document: Arc<dyn Document>, scroll: ScrollSettings) -> Self {
        Self {
            hints: HintEngine::new(document.clone()),
            document,
            scroll,
        }
    }

    pub fn hints(&self) -> &HintEngine {
        &self.hints
    }

    /// Execute one request. Failures become `{error}` responses.
    pub async fn handle(&self, request: PageRequest) -> PageResponse {
        debug!(command = %request.command, "Page command received");

        let Some(command) = PageCommand::from_name(&request.command) else {
            warn!(command = %request.command, "Unknown page command");
            return PageResponse::rejected("Unknown command");
        };

        match self.execute(command, &request.args).await {
            Ok(response) => response,
            Err(e) => {
                error!(command = %command, error = %e, "Page command failed");
                PageResponse::rejected(e.to_string())
            }
        }
    }

    async fn execute(
        &self,
        command: PageCommand,
        args: &CommandArgs,
    ) -> Result<PageResponse, PageError> {
        match command {
            PageCommand::ScrollUp => self.scroll_by(-self.scroll.line_step).await,
            PageCommand::ScrollDown => self.scroll_by(self.scroll.line_step).await,
            PageCommand::PageUp => {
                let step = self.page_step().await?;
                self.scroll_by(-step).await
            }
            PageCommand::PageDown => {
                let step = self.page_step().await?;
                self.scroll_by(step).await
            }
            PageCommand::JumpTop => self.scroll_to(ScrollTarget::Top).await,
            PageCommand::JumpBottom => self.scroll_to(ScrollTarget::Bottom).await,
            PageCommand::ShowHints => {
                let count = self.hints.show().await?;
                Ok(PageResponse::ok_with("hints", count))
            }
            PageCommand::HideHints => {
                self.hints.hide().await?;
                Ok(PageResponse::ok())
            }
            PageCommand::HintClick => {
                let Some(label) = string_arg(args, "label") else {
                    warn!("Hint click without a label");
                    return Ok(PageResponse::ok_with("found", false));
                };
                let outcome = self.hints.resolve_and_activate(label).await?;
                Ok(PageResponse::ok_with(
                    "found",
                    matches!(outcome, HintOutcome::Activated { .. }),
                ))
            }
        }
    }

    async fn page_step(&self) -> Result<f64, PageError> {
        let viewport = self.document.viewport().await?;
        Ok(viewport.height as f64 * self.scroll.page_fraction)
    }

    async fn scroll_by(&self, dy: f64) -> Result<PageResponse, PageError> {
        self.scroll_to(ScrollTarget::By(dy)).await
    }

    async fn scroll_to(&self, target: ScrollTarget) -> Result<PageResponse, PageError> {
        self.document
            .scroll(Scroll {
                target,
                smooth: self.scroll.smooth,
            })
            .await?;
        Ok(PageResponse::ok())
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
