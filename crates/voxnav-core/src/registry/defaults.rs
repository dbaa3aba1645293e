//! The built-in command vocabulary.

use std::sync::Arc;

use voxnav_protocols::{Browser, CommandScope, PageCommand};

use super::{CommandDescriptor, CommandRegistry};
use crate::bridge::ContentBridge;
use crate::error::RegistryError;
use crate::handlers::{
    CloseTab, CycleTab, FocusAddress, ForwardToPage, History, HistoryAction, NewTab, OpenUrl,
};

impl CommandRegistry {
    /// Registry holding every browser- and page-level command.
    pub fn with_defaults(
        browser: Arc<dyn Browser>,
        bridge: Arc<ContentBridge>,
    ) -> Result<Self, RegistryError> {
        let registry = Self::new();
        registry.register_browser_commands(browser)?;
        registry.register_page_commands(bridge)?;
        Ok(registry)
    }

    fn register_browser_commands(&self, browser: Arc<dyn Browser>) -> Result<(), RegistryError> {
        let scope = CommandScope::Browser;

        for action in [HistoryAction::Back, HistoryAction::Forward, HistoryAction::Reload] {
            self.register(CommandDescriptor::new(
                action.command_name(),
                scope,
                Arc::new(History::new(browser.clone(), action)),
            ))?;
        }

        self.register(CommandDescriptor::new(
            "next_tab",
            scope,
            Arc::new(CycleTab::next(browser.clone())),
        ))?;
        self.register(
            CommandDescriptor::new("prev_tab", scope, Arc::new(CycleTab::previous(browser.clone())))
                .alias("previous_tab"),
        )?;
        self.register(CommandDescriptor::new(
            "new_tab",
            scope,
            Arc::new(NewTab::new(browser.clone())),
        ))?;
        self.register(CommandDescriptor::new(
            "close_tab",
            scope,
            Arc::new(CloseTab::new(browser.clone())),
        ))?;
        self.register(CommandDescriptor::new(
            "focus_address",
            scope,
            Arc::new(FocusAddress::new(browser.clone())),
        ))?;
        self.register(
            CommandDescriptor::new("open_url", scope, Arc::new(OpenUrl::new(browser)))
                .require("url", "URL not provided"),
        )?;
        Ok(())
    }

    fn register_page_commands(&self, bridge: Arc<ContentBridge>) -> Result<(), RegistryError> {
        for command in PageCommand::ALL {
            let mut descriptor = CommandDescriptor::new(
                command.as_str(),
                CommandScope::Page,
                Arc::new(ForwardToPage::new(bridge.clone(), command)),
            );
            if command == PageCommand::HintClick {
                descriptor = descriptor.require("label", "Hint label not provided");
            }
            self.register(descriptor)?;
        }
        Ok(())
    }
}
