//! Enable/disable OCR drawers for image insertions.
//!
//! Enabling registers the drawer hook and keeps the returned subscription;
//! disabling consumes it. Holding at most one subscription means the hook can
//! never be registered twice.

use std::sync::Arc;

use tracing::info;

use crate::registry::{Hook, HookId, HookRegistry};
use crate::types::HookPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Enabled,
    Disabled,
}

/// An active hook registration. Dropping it leaves the hook registered;
/// call `cancel` to remove it.
#[must_use = "a subscription must be cancelled to unregister its hook"]
pub struct Subscription {
    id: HookId,
    registry: HookRegistry,
}

impl Subscription {
    pub async fn subscribe(registry: &HookRegistry, phase: HookPhase, hook: Arc<dyn Hook>) -> Self {
        let id = registry.register(phase, hook).await;
        Self { id, registry: registry.clone() }
    }

    pub fn id(&self) -> HookId {
        self.id
    }

    pub async fn cancel(self) {
        self.registry.unregister(self.id).await;
    }
}

/// Process-level switch connecting image insertions to OCR drawers.
pub struct OcrLifecycle {
    registry: HookRegistry,
    hook: Arc<dyn Hook>,
    subscription: Option<Subscription>,
}

impl OcrLifecycle {
    /// Starts disabled.
    pub fn new(registry: HookRegistry, hook: Arc<dyn Hook>) -> Self {
        Self { registry, hook, subscription: None }
    }

    pub fn state(&self) -> LifecycleState {
        if self.subscription.is_some() {
            LifecycleState::Enabled
        } else {
            LifecycleState::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state() == LifecycleState::Enabled
    }

    /// Register the hook for image insertions. No-op when already enabled.
    pub async fn enable(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let sub = Subscription::subscribe(&self.registry, HookPhase::ImageInserted, Arc::clone(&self.hook)).await;
        info!("OCR drawers enabled ({})", sub.id());
        self.subscription = Some(sub);
    }

    /// Unregister the hook. No-op when already disabled.
    pub async fn disable(&mut self) {
        if let Some(sub) = self.subscription.take() {
            info!("OCR drawers disabled ({})", sub.id());
            sub.cancel().await;
        }
    }

    /// Flip between enabled and disabled; returns the new state.
    pub async fn toggle(&mut self) -> LifecycleState {
        match self.state() {
            LifecycleState::Enabled => self.disable().await,
            LifecycleState::Disabled => self.enable().await,
        }
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::DrawerHook;
    use crate::pipeline::HookPipeline;
    use crate::types::ImageInsertedPayload;
    use async_trait::async_trait;
    use orgocr_core::{BackendKind, OcrEngine, OcrError};
    use orgocr_drawer::{DrawerInserter, TextDocument};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    struct StaticEngine {
        text: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OcrEngine for StaticEngine {
        fn kind(&self) -> BackendKind {
            BackendKind::Tesseract
        }

        async fn recognize(&self, _image: &Path) -> Result<String, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.to_string())
        }
    }

    struct Fixture {
        _tmp: tempfile::TempDir,
        image: PathBuf,
        engine: Arc<StaticEngine>,
        document: Arc<Mutex<TextDocument>>,
        pipeline: HookPipeline,
        lifecycle: OcrLifecycle,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = tmp.path().join("shot.png");
        std::fs::write(&image, b"png").unwrap();

        let engine = Arc::new(StaticEngine { text: "Sample Text\n", calls: AtomicUsize::new(0) });
        let document = Arc::new(Mutex::new(TextDocument::new("* Notes\n[[file:shot.png]]\n")));
        let hook = DrawerHook::new(document.clone(), DrawerInserter::new(engine.clone()));
        let pipeline = HookPipeline::default();
        let lifecycle = OcrLifecycle::new(pipeline.registry.clone(), Arc::new(hook));
        Fixture { _tmp: tmp, image, engine, document, pipeline, lifecycle }
    }

    fn event(image: &Path) -> ImageInsertedPayload {
        ImageInsertedPayload { image_path: image.to_path_buf(), anchor_line: 1 }
    }

    #[tokio::test]
    async fn starts_disabled() {
        let mut f = fixture();
        assert_eq!(f.lifecycle.state(), LifecycleState::Disabled);

        let result = f.pipeline.image_inserted(event(&f.image)).await.unwrap();
        assert!(result.drawers.is_empty());
        assert_eq!(f.engine.calls.load(Ordering::SeqCst), 0);

        f.lifecycle.disable().await;
        assert!(!f.lifecycle.is_enabled());
    }

    #[tokio::test]
    async fn double_enable_registers_once() {
        let mut f = fixture();
        f.lifecycle.enable().await;
        f.lifecycle.enable().await;
        assert_eq!(f.pipeline.registry.count(HookPhase::ImageInserted).await, 1);

        let result = f.pipeline.image_inserted(event(&f.image)).await.unwrap();
        assert_eq!(result.drawers.len(), 1);
        assert_eq!(f.engine.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            f.document.lock().await.as_str(),
            "* Notes\n[[file:shot.png]]\n:ocr:\nSample Text\n:end:\n"
        );
        assert_eq!(f.document.lock().await.fold_requests(), 1);
    }

    #[tokio::test]
    async fn disable_stops_annotations() {
        let mut f = fixture();
        f.lifecycle.enable().await;
        f.lifecycle.disable().await;
        f.lifecycle.disable().await;
        assert_eq!(f.pipeline.registry.count(HookPhase::ImageInserted).await, 0);

        f.pipeline.image_inserted(event(&f.image)).await.unwrap();
        assert_eq!(f.engine.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.document.lock().await.as_str(), "* Notes\n[[file:shot.png]]\n");
    }

    #[tokio::test]
    async fn toggle_flips_state() {
        let mut f = fixture();
        assert_eq!(f.lifecycle.toggle().await, LifecycleState::Enabled);
        assert_eq!(f.lifecycle.toggle().await, LifecycleState::Disabled);
        assert_eq!(f.pipeline.registry.count(HookPhase::ImageInserted).await, 0);
    }

    #[tokio::test]
    async fn missing_image_event_is_ignored() {
        let mut f = fixture();
        f.lifecycle.enable().await;
        let result = f
            .pipeline
            .image_inserted(event(Path::new("/no/such/image.png")))
            .await
            .unwrap();
        assert!(result.drawers.is_empty());
        assert_eq!(f.engine.calls.load(Ordering::SeqCst), 0);
    }
}
