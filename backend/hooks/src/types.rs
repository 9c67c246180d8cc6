/// Hook lifecycle phases.
///
/// Hooks fire when the editor reports an inserted image and after a drawer
/// has been written for it.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Hook phases
// ---------------------------------------------------------------------------

/// The lifecycle phase at which a hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    /// An image link was inserted into the document.
    ImageInserted,
    /// An OCR drawer was written below an image link.
    DrawerInserted,
}

// ---------------------------------------------------------------------------
// Payload carried into each hook
// ---------------------------------------------------------------------------

/// Payload for image-inserted hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInsertedPayload {
    /// Path of the inserted image as the editor reported it.
    pub image_path: PathBuf,
    /// Zero-indexed line holding the image link.
    pub anchor_line: usize,
}

/// Payload for drawer-inserted hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerInsertedPayload {
    pub image_path: PathBuf,
    /// Line of the `:ocr:` marker.
    pub drawer_line: usize,
    pub text_lines: usize,
}

/// Union payload type passed to all hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum HookPayload {
    ImageInserted(ImageInsertedPayload),
    DrawerInserted(DrawerInsertedPayload),
}

impl HookPayload {
    pub fn phase(&self) -> HookPhase {
        match self {
            Self::ImageInserted(_) => HookPhase::ImageInserted,
            Self::DrawerInserted(_) => HookPhase::DrawerInserted,
        }
    }
}

// ---------------------------------------------------------------------------
// Hook result
// ---------------------------------------------------------------------------

/// Result returned by a hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookResult {
    /// Drawers written into the document by this hook.
    pub drawers: Vec<DrawerInsertedPayload>,
}

impl HookResult {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn inserted(drawer: DrawerInsertedPayload) -> Self {
        Self { drawers: vec![drawer] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_tagged_by_phase() {
        let payload = HookPayload::ImageInserted(ImageInsertedPayload {
            image_path: "/tmp/shot.png".into(),
            anchor_line: 3,
        });
        assert_eq!(payload.phase(), HookPhase::ImageInserted);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["phase"], "image_inserted");
        assert_eq!(json["anchor_line"], 3);
    }
}
