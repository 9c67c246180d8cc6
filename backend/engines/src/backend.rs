//! Backend selection.
//!
//! The selector is parsed once into a closed set of engines; everything after
//! that goes through `OcrEngine::recognize`.

use std::path::Path;

use async_trait::async_trait;
use orgocr_core::{BackendKind, OcrEngine, OcrError, OcrSettings};

use crate::easyocr::EasyOcrEngine;
use crate::tesseract::TesseractEngine;

#[derive(Debug, Clone)]
pub enum Backend {
    Tesseract(TesseractEngine),
    EasyOcr(EasyOcrEngine),
}

impl Backend {
    pub fn new(kind: BackendKind, settings: &OcrSettings) -> Self {
        match kind {
            BackendKind::Tesseract => Self::Tesseract(TesseractEngine::from_settings(settings)),
            BackendKind::EasyOcr => Self::EasyOcr(EasyOcrEngine::from_settings(settings)),
        }
    }

    /// Build the engine named by `settings.backend`.
    pub fn from_settings(settings: &OcrSettings) -> Result<Self, OcrError> {
        Ok(Self::new(settings.backend_kind()?, settings))
    }
}

#[async_trait]
impl OcrEngine for Backend {
    fn kind(&self) -> BackendKind {
        match self {
            Self::Tesseract(e) => e.kind(),
            Self::EasyOcr(e) => e.kind(),
        }
    }

    async fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        match self {
            Self::Tesseract(e) => e.recognize(image).await,
            Self::EasyOcr(e) => e.recognize(image).await,
        }
    }
}

/// Run the engine named by `selector` on `image`.
///
/// An unknown selector fails before any process is started.
pub async fn run_ocr(
    selector: &str,
    image: &Path,
    settings: &OcrSettings,
) -> Result<String, OcrError> {
    let kind: BackendKind = selector.parse()?;
    Backend::new(kind, settings).recognize(image).await
}
