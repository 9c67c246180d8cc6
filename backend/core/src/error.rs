use std::path::PathBuf;

use thiserror::Error;

use crate::types::BackendKind;

/// Top-level error type for OCR runs and drawer insertion.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("unknown OCR backend {0:?} (expected one of: tesseract, easyocr)")]
    UnknownBackend(String),

    #[error("{backend} engine failed ({status}): {stderr}")]
    EngineFailed {
        backend: BackendKind,
        status: String,
        stderr: String,
    },

    #[error("failed to provision helper script at {}: {source}", path.display())]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    /// True for errors caused by configuration rather than by an engine run.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::UnknownBackend(_))
    }
}
