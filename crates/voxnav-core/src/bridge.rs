//! Delivery of page-level commands to the active tab's page runtime.

use std::sync::Arc;

use tracing::{debug, warn};

use voxnav_protocols::{
    Ack, Browser, CommandArgs, CommandError, PageCommand, PageRequest, PageResponse,
    PageTransport,
};

pub struct ContentBridge {
    browser: Arc<dyn Browser>,
    transport: Arc<dyn PageTransport>,
}

impl ContentBridge {
    pub fn new(browser: Arc<dyn Browser>, transport: Arc<dyn PageTransport>) -> Self {
        Self { browser, transport }
    }

    /// Deliver `command` to the active tab and wait for the page's answer.
    ///
    /// A rejection from the page is logged and still acknowledged; the page owns
    /// its own failures.
    pub async fn forward(
        &self,
        command: PageCommand,
        args: CommandArgs,
    ) -> Result<Ack, CommandError> {
        let tab = self
            .browser
            .active_tab()
            .await?
            .ok_or(CommandError::NoActiveTab)?;

        debug!(tab = %tab.id, command = %command, "Forwarding page command");
        let response = self
            .transport
            .deliver(&tab.id, PageRequest::new(command, args))
            .await?;

        match response {
            PageResponse::Rejected { error } => {
                warn!(tab = %tab.id, command = %command, error = %error, "Page rejected command");
            }
            PageResponse::Ok { detail, .. } => {
                debug!(tab = %tab.id, command = %command, ?detail, "Page command done");
            }
        }
        Ok(Ack::Done)
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
