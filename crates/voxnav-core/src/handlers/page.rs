use std::sync::Arc;

use async_trait::async_trait;

use voxnav_protocols::{Ack, CommandArgs, CommandError, PageCommand};

use crate::bridge::ContentBridge;
use crate::registry::CommandHandler;

/// Route a page-level command through the content bridge.
pub struct ForwardToPage {
    bridge: Arc<ContentBridge>,
    command: PageCommand,
}

impl ForwardToPage {
    pub fn new(bridge: Arc<ContentBridge>, command: PageCommand) -> Self {
        Self { bridge, command }
    }
}

#[async_trait]
impl CommandHandler for ForwardToPage {
    async fn handle(&self, args: &CommandArgs) -> Result<Ack, CommandError> {
        self.bridge.forward(self.command, args.clone()).await
    }
}
