//! `Document` over a CDP page session.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use voxnav_page_hints::{Document, ElementSnapshot, HintMarker, NodeId, Scroll, ViewportInfo};
use voxnav_protocols::PageError;

use crate::cdp::PageSession;
use crate::scripts;

pub struct CdpDocument {
    session: Arc<PageSession>,
}

impl CdpDocument {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    async fn eval<T: DeserializeOwned>(&self, script: &str) -> Result<T, PageError> {
        let value = self.session.evaluate(script).await?;
        serde_json::from_value(value)
            .map_err(|e| PageError::Script(format!("Unexpected result: {}", e)))
    }
}

#[async_trait]
impl Document for CdpDocument {
    async fn viewport(&self) -> Result<ViewportInfo, PageError> {
        self.eval(scripts::VIEWPORT).await
    }

    async fn query_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>, PageError> {
        let elements: Vec<ElementSnapshot> =
            self.eval(&scripts::query_elements(selector)).await?;
        debug!(
            target = %self.session.target_id(),
            count = elements.len(),
            "Queried elements"
        );
        Ok(elements)
    }

    async fn activate(&self, node: NodeId) -> Result<(), PageError> {
        let clicked: bool = self.eval(&scripts::activate(node)).await?;
        if clicked {
            Ok(())
        } else {
            Err(PageError::StaleElement(node.0))
        }
    }

    async fn mount_overlay(&self, markers: &[HintMarker]) -> Result<(), PageError> {
        let _drawn: u64 = self.eval(&scripts::mount_overlay(markers)).await?;
        Ok(())
    }

    async fn unmount_overlay(&self) -> Result<(), PageError> {
        let _: bool = self.eval(&scripts::unmount_overlay()).await?;
        Ok(())
    }

    async fn scroll(&self, scroll: Scroll) -> Result<(), PageError> {
        let _: bool = self.eval(&scripts::scroll(scroll)).await?;
        Ok(())
    }
}
