pub mod builtin;
pub mod lifecycle;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use builtin::{DrawerHook, LoggingHook};
pub use lifecycle::{LifecycleState, OcrLifecycle, Subscription};
pub use pipeline::HookPipeline;
pub use registry::{Hook, HookId, HookRegistry};
pub use types::{
    DrawerInsertedPayload, HookPayload, HookPhase, HookResult, ImageInsertedPayload,
};
