//! In-memory org document with a cursor.

use std::path::Path;

use anyhow::{Context, Result};
use orgocr_core::Document;
use tokio::fs;

/// A text buffer with a byte-offset cursor, standing in for an editor buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    cursor: usize,
    fold_requests: usize,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
            fold_requests: 0,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        Ok(Self::new(text))
    }

    /// Write the document back atomically (temp file, then rename).
    pub async fn save(&self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));
        fs::write(&tmp_path, self.text.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp document: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .await
            .with_context(|| format!("Failed to replace document: {}", path.display()))?;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// How many times the view was asked to fold drawers.
    pub fn fold_requests(&self) -> usize {
        self.fold_requests
    }

    /// Byte offset where line `index` starts, if the document has that line.
    fn line_start(&self, index: usize) -> Option<usize> {
        if index == 0 {
            return Some(0);
        }
        self.text
            .match_indices('\n')
            .nth(index - 1)
            .map(|(i, _)| i + 1)
            .filter(|&start| start < self.text.len())
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.text.lines().nth(index)
    }

    fn goto_line_after(&mut self, anchor_line: usize) {
        self.cursor = match self.line_start(anchor_line + 1) {
            Some(start) => start,
            None => {
                if !self.text.is_empty() && !self.text.ends_with('\n') {
                    self.text.push('\n');
                }
                self.text.len()
            }
        };
    }

    fn insert(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn fold_drawers(&mut self) {
        self.fold_requests += 1;
    }
}
