/// Hook pipeline executor.
///
/// The pipeline is the public API surface for firing hooks:
/// 1. The editor inserts an image link → `pipeline.image_inserted(...)`
/// 2. A drawer is written for it → `pipeline.drawer_inserted(...)`
use anyhow::Result;
use tracing::debug;

use crate::registry::HookRegistry;
use crate::types::{DrawerInsertedPayload, HookPayload, HookResult, ImageInsertedPayload};

/// Top-level pipeline that wraps the registry with convenient method APIs.
#[derive(Clone, Default)]
pub struct HookPipeline {
    pub registry: HookRegistry,
}

impl HookPipeline {
    pub fn new(registry: HookRegistry) -> Self {
        Self { registry }
    }

    /// Fire image-inserted hooks, then drawer-inserted hooks for every drawer
    /// they wrote.
    pub async fn image_inserted(&self, payload: ImageInsertedPayload) -> Result<HookResult> {
        debug!(
            "[Pipeline] image_inserted image={} line={}",
            payload.image_path.display(),
            payload.anchor_line
        );
        let result = self.registry.run(&HookPayload::ImageInserted(payload)).await?;
        for drawer in &result.drawers {
            self.drawer_inserted(drawer.clone()).await?;
        }
        Ok(result)
    }

    pub async fn drawer_inserted(&self, payload: DrawerInsertedPayload) -> Result<HookResult> {
        debug!(
            "[Pipeline] drawer_inserted image={} line={}",
            payload.image_path.display(),
            payload.drawer_line
        );
        self.registry.run(&HookPayload::DrawerInserted(payload)).await
    }
}
