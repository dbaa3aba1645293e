//! Tab cycling, tab lifecycle, and address bar.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use voxnav_protocols::command::string_arg;
use voxnav_protocols::{Ack, Browser, CommandArgs, CommandError, TabQuery};

use crate::registry::CommandHandler;

/// Activate the tab `step` positions from the active one, wrapping both ways.
pub struct CycleTab {
    browser: Arc<dyn Browser>,
    step: isize,
}

impl CycleTab {
    pub fn next(browser: Arc<dyn Browser>) -> Self {
        Self { browser, step: 1 }
    }

    pub fn previous(browser: Arc<dyn Browser>) -> Self {
        Self { browser, step: -1 }
    }
}

#[async_trait]
impl CommandHandler for CycleTab {
    async fn handle(&self, _args: &CommandArgs) -> Result<Ack, CommandError> {
        let mut tabs = self.browser.query_tabs(TabQuery::current_window()).await?;
        tabs.sort_by_key(|t| t.index);

        let Some(current) = tabs.iter().position(|t| t.active) else {
            debug!("No active tab, skipping tab switch");
            return Ok(Ack::Skipped);
        };

        let len = tabs.len() as isize;
        let target = (current as isize + self.step).rem_euclid(len) as usize;
        let tab = &tabs[target];
        debug!(from = current, to = target, tab = %tab.id, "Switching tab");
        self.browser.activate_tab(&tab.id).await?;
        Ok(Ack::Done)
    }
}

pub struct NewTab {
    browser: Arc<dyn Browser>,
}

impl NewTab {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl CommandHandler for NewTab {
    async fn handle(&self, _args: &CommandArgs) -> Result<Ack, CommandError> {
        let tab = self.browser.create_tab(None).await?;
        debug!(tab = %tab.id, "Opened new tab");
        Ok(Ack::Done)
    }
}

pub struct CloseTab {
    browser: Arc<dyn Browser>,
}

impl CloseTab {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl CommandHandler for CloseTab {
    async fn handle(&self, _args: &CommandArgs) -> Result<Ack, CommandError> {
        let Some(tab) = self.browser.active_tab().await? else {
            debug!("No active tab, nothing to close");
            return Ok(Ack::Skipped);
        };
        self.browser.remove_tab(&tab.id).await?;
        Ok(Ack::Done)
    }
}

/// Best-effort: a browser that cannot focus its address bar still gets an ack.
pub struct FocusAddress {
    browser: Arc<dyn Browser>,
}

impl FocusAddress {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl CommandHandler for FocusAddress {
    async fn handle(&self, _args: &CommandArgs) -> Result<Ack, CommandError> {
        if self.browser.focus_address_bar().await? {
            Ok(Ack::Done)
        } else {
            warn!("Address bar focus is not supported by this browser");
            Ok(Ack::Skipped)
        }
    }
}

/// Open `args.url` in a new tab.
pub struct OpenUrl {
    browser: Arc<dyn Browser>,
}

impl OpenUrl {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl CommandHandler for OpenUrl {
    async fn handle(&self, args: &CommandArgs) -> Result<Ack, CommandError> {
        let url = string_arg(args, "url")
            .ok_or_else(|| CommandError::missing_argument("url", "URL not provided"))?;
        let tab = self.browser.create_tab(Some(url)).await?;
        info!(url, tab = %tab.id, "Opened URL");
        Ok(Ack::Done)
    }
}
