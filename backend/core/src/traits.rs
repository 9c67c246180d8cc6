use std::path::Path;

use async_trait::async_trait;

use crate::error::OcrError;
use crate::types::BackendKind;

/// An OCR engine integration.
///
/// Each engine hides its own invocation convention (stdout capture, output
/// files, environment wrapping) and returns the recognized text verbatim.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Which backend this engine implements.
    fn kind(&self) -> BackendKind;

    /// Recognize the text in `image`. An image without text yields `""`.
    async fn recognize(&self, image: &Path) -> Result<String, OcrError>;
}

/// The host editor's view of a text buffer.
///
/// Lines are zero-indexed. Insertion happens at the cursor.
pub trait Document: Send {
    fn line_count(&self) -> usize;

    fn line(&self, index: usize) -> Option<&str>;

    /// Move the cursor to the start of the line below `anchor_line`,
    /// terminating the anchor line first if it is the unterminated last line.
    fn goto_line_after(&mut self, anchor_line: usize);

    /// Insert `text` at the cursor and leave the cursor after it.
    fn insert(&mut self, text: &str);

    /// Ask the view to collapse every drawer.
    fn fold_drawers(&mut self);
}
