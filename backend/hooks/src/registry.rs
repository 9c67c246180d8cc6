/// Hook trait and registry.
///
/// Hooks are async functions that observe or act on pipeline events.
/// Multiple hooks can be registered per phase; they run sequentially in
/// registration order. The first hook to return an error halts the chain.
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::types::{HookPayload, HookPhase, HookResult};

// ---------------------------------------------------------------------------
// Hook trait
// ---------------------------------------------------------------------------

/// A hook that runs at a specific lifecycle phase.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Run the hook. Return `HookResult::pass()` to continue normally.
    async fn run(&self, payload: &HookPayload) -> Result<HookResult>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Identifies one registration, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(Uuid);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type HookBox = Arc<dyn Hook>;
type PhaseMap = HashMap<HookPhase, Vec<(HookId, HookBox)>>;

/// Thread-safe registry of hooks organized by phase.
#[derive(Default, Clone)]
pub struct HookRegistry {
    hooks: Arc<RwLock<PhaseMap>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook to run at a specific phase.
    pub async fn register(&self, phase: HookPhase, hook: Arc<dyn Hook>) -> HookId {
        let id = HookId(Uuid::new_v4());
        debug!("[Hooks] Registering {} for phase {:?} ({})", hook.name(), phase, id);
        let mut map = self.hooks.write().await;
        map.entry(phase).or_default().push((id, hook));
        id
    }

    /// Remove a registration. Returns false if it was already gone.
    pub async fn unregister(&self, id: HookId) -> bool {
        let mut map = self.hooks.write().await;
        for chain in map.values_mut() {
            if let Some(pos) = chain.iter().position(|(hid, _)| *hid == id) {
                let (_, hook) = chain.remove(pos);
                debug!("[Hooks] Unregistered {} ({})", hook.name(), id);
                return true;
            }
        }
        false
    }

    /// Number of hooks registered for a phase.
    pub async fn count(&self, phase: HookPhase) -> usize {
        self.hooks.read().await.get(&phase).map(Vec::len).unwrap_or(0)
    }

    /// Run all hooks registered for the phase in the given payload.
    /// Returns the merged `HookResult` after running the chain.
    pub async fn run(&self, payload: &HookPayload) -> Result<HookResult> {
        let phase = payload.phase();
        // Snapshot the chain so hooks can (un)register without deadlocking.
        let chain: Vec<HookBox> = {
            let map = self.hooks.read().await;
            let Some(chain) = map.get(&phase) else {
                return Ok(HookResult::pass());
            };
            chain.iter().map(|(_, hook)| Arc::clone(hook)).collect()
        };

        let mut merged = HookResult::pass();
        for hook in chain.iter() {
            debug!("[Hooks] Running {} for phase {:?}", hook.name(), phase);
            let result = match hook.run(payload).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("[Hooks] {} returned error: {}", hook.name(), e);
                    return Err(e);
                }
            };
            merged.drawers.extend(result.drawers);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DrawerInsertedPayload, ImageInsertedPayload};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHook {
        calls: AtomicUsize,
        result: fn() -> Result<HookResult>,
    }

    #[async_trait]
    impl Hook for CountingHook {
        fn name(&self) -> &str { "counting_hook" }

        async fn run(&self, _payload: &HookPayload) -> Result<HookResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn counting(result: fn() -> Result<HookResult>) -> Arc<CountingHook> {
        Arc::new(CountingHook { calls: AtomicUsize::new(0), result })
    }

    fn image_payload() -> HookPayload {
        HookPayload::ImageInserted(ImageInsertedPayload {
            image_path: "a.png".into(),
            anchor_line: 0,
        })
    }

    #[tokio::test]
    async fn unregister_removes_hook() {
        let registry = HookRegistry::new();
        let hook = counting(|| Ok(HookResult::pass()));
        let id = registry.register(HookPhase::ImageInserted, hook.clone()).await;
        assert_eq!(registry.count(HookPhase::ImageInserted).await, 1);

        assert!(registry.unregister(id).await);
        assert!(!registry.unregister(id).await);
        registry.run(&image_payload()).await.unwrap();
        assert_eq!(hook.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn drawers_are_merged_in_registration_order() {
        let registry = HookRegistry::new();
        let drawer = |line| DrawerInsertedPayload { image_path: "a.png".into(), drawer_line: line, text_lines: 1 };
        let first = counting(|| Ok(HookResult::inserted(DrawerInsertedPayload { image_path: "a.png".into(), drawer_line: 1, text_lines: 1 })));
        let second = counting(|| Ok(HookResult::inserted(DrawerInsertedPayload { image_path: "a.png".into(), drawer_line: 5, text_lines: 1 })));
        registry.register(HookPhase::ImageInserted, first.clone()).await;
        registry.register(HookPhase::ImageInserted, second.clone()).await;

        let result = registry.run(&image_payload()).await.unwrap();
        assert_eq!(result.drawers, vec![drawer(1), drawer(5)]);
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_propagate() {
        let registry = HookRegistry::new();
        registry
            .register(HookPhase::ImageInserted, counting(|| Err(anyhow::anyhow!("bad backend"))))
            .await;
        let err = registry.run(&image_payload()).await.unwrap_err();
        assert_eq!(err.to_string(), "bad backend");
    }

    #[tokio::test]
    async fn other_phases_are_not_run() {
        let registry = HookRegistry::new();
        let hook = counting(|| Ok(HookResult::pass()));
        registry.register(HookPhase::DrawerInserted, hook.clone()).await;
        registry.run(&image_payload()).await.unwrap();
        assert_eq!(hook.calls.load(Ordering::SeqCst), 0);
    }
}
