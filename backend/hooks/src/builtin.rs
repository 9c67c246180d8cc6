/// Built-in hook implementations.
use anyhow::Result;
use async_trait::async_trait;
use orgocr_core::Document;
use orgocr_drawer::{DrawerInserter, InsertOutcome};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::registry::Hook;
use crate::types::{DrawerInsertedPayload, HookPayload, HookResult};

// ---------------------------------------------------------------------------
// Logging hook: logs every lifecycle event
// ---------------------------------------------------------------------------

pub struct LoggingHook {
    pub prefix: String,
}

impl LoggingHook {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

#[async_trait]
impl Hook for LoggingHook {
    fn name(&self) -> &str { "logging_hook" }

    async fn run(&self, payload: &HookPayload) -> Result<HookResult> {
        match payload {
            HookPayload::ImageInserted(p) => {
                info!("[{}] Image inserted: {} (line {})", self.prefix, p.image_path.display(), p.anchor_line + 1);
            }
            HookPayload::DrawerInserted(p) => {
                info!(
                    "[{}] OCR drawer at line {} ({} line(s)) for {}",
                    self.prefix,
                    p.drawer_line + 1,
                    p.text_lines,
                    p.image_path.display()
                );
            }
        }
        Ok(HookResult::pass())
    }
}

// ---------------------------------------------------------------------------
// Drawer hook: OCR the inserted image and write a drawer below its link
// ---------------------------------------------------------------------------

/// Connects image-inserted events to the drawer inserter for one document.
pub struct DrawerHook<D> {
    document: Arc<Mutex<D>>,
    inserter: DrawerInserter,
}

impl<D: Document + 'static> DrawerHook<D> {
    pub fn new(document: Arc<Mutex<D>>, inserter: DrawerInserter) -> Self {
        Self { document, inserter }
    }
}

#[async_trait]
impl<D: Document + 'static> Hook for DrawerHook<D> {
    fn name(&self) -> &str { "drawer_hook" }

    async fn run(&self, payload: &HookPayload) -> Result<HookResult> {
        let HookPayload::ImageInserted(p) = payload else {
            return Ok(HookResult::pass());
        };

        let mut doc = self.document.lock().await;
        let outcome = self
            .inserter
            .insert_annotation(&mut *doc, p.anchor_line, &p.image_path)
            .await?;

        Ok(match outcome {
            InsertOutcome::Skipped { .. } => HookResult::pass(),
            InsertOutcome::Inserted { image, drawer_line, text_lines } => {
                HookResult::inserted(DrawerInsertedPayload { image_path: image, drawer_line, text_lines })
            }
        })
    }
}
