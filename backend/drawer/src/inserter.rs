//! Drawer insertion pipeline: resolve image, recognize, insert, fold.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use orgocr_core::{Document, OcrEngine, OcrError};
use orgocr_logging::{EventLogger, OcrEvent};
use tracing::debug;

use crate::format::format_drawer;

/// What an insertion attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The image does not resolve to an existing file; nothing was touched.
    Skipped { image: PathBuf },
    /// A drawer was inserted starting at `drawer_line`.
    Inserted {
        image: PathBuf,
        drawer_line: usize,
        text_lines: usize,
    },
}

/// Runs OCR for an image and inserts the result below its link.
#[derive(Clone)]
pub struct DrawerInserter {
    engine: Arc<dyn OcrEngine>,
    base_dir: Option<PathBuf>,
}

impl DrawerInserter {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            engine,
            base_dir: None,
        }
    }

    /// Resolve relative image paths against `dir` instead of the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Absolute path of `image` if it names an existing file.
    pub async fn resolve_image(&self, image: &Path) -> Option<PathBuf> {
        let joined = match (&self.base_dir, image.is_relative()) {
            (Some(base), true) => base.join(image),
            _ => image.to_path_buf(),
        };
        let meta = tokio::fs::metadata(&joined).await.ok()?;
        if !meta.is_file() {
            return None;
        }
        tokio::fs::canonicalize(&joined).await.ok()
    }

    /// Insert an OCR drawer for `image` on the line below `anchor_line`.
    ///
    /// A missing image is a no-op. Calling this twice for the same anchor
    /// stacks two drawers.
    pub async fn insert_annotation<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        anchor_line: usize,
        image: &Path,
    ) -> Result<InsertOutcome, OcrError> {
        let Some(abs) = self.resolve_image(image).await else {
            debug!(image = %image.display(), "Image does not exist; skipping OCR");
            return Ok(InsertOutcome::Skipped {
                image: image.to_path_buf(),
            });
        };
        let shown = abs.display().to_string();

        EventLogger::log_event(OcrEvent::Starting {
            image: shown.clone(),
        });
        EventLogger::log_event(OcrEvent::Recognizing {
            image: shown.clone(),
            backend: self.engine.kind().to_string(),
        });

        let text = match self.engine.recognize(&abs).await {
            Ok(text) => text,
            Err(e) => {
                EventLogger::log_event(OcrEvent::Failed {
                    image: shown,
                    error_msg: e.to_string(),
                });
                return Err(e);
            }
        };

        let block = format_drawer(&text);
        let text_lines = block.lines().count() - 2;
        doc.goto_line_after(anchor_line);
        doc.insert(&block);
        doc.fold_drawers();

        EventLogger::log_event(OcrEvent::Done {
            image: shown,
            chars: text.chars().count(),
            lines: text_lines,
        });

        Ok(InsertOutcome::Inserted {
            image: abs,
            drawer_line: anchor_line + 1,
            text_lines,
        })
    }
}
