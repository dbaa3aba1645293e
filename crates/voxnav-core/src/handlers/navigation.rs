//! History navigation on the active tab.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use voxnav_protocols::{Ack, Browser, CommandArgs, CommandError};

use crate::registry::CommandHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Back,
    Forward,
    Reload,
}

impl HistoryAction {
    pub fn command_name(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Reload => "reload",
        }
    }
}

pub struct History {
    browser: Arc<dyn Browser>,
    action: HistoryAction,
}

impl History {
    pub fn new(browser: Arc<dyn Browser>, action: HistoryAction) -> Self {
        Self { browser, action }
    }
}

#[async_trait]
impl CommandHandler for History {
    async fn handle(&self, _args: &CommandArgs) -> Result<Ack, CommandError> {
        let Some(tab) = self.browser.active_tab().await? else {
            debug!(action = self.action.command_name(), "No active tab, skipping");
            return Ok(Ack::Skipped);
        };

        match self.action {
            HistoryAction::Back => self.browser.go_back(&tab.id).await?,
            HistoryAction::Forward => self.browser.go_forward(&tab.id).await?,
            HistoryAction::Reload => self.browser.reload(&tab.id).await?,
        }
        Ok(Ack::Done)
    }
}
