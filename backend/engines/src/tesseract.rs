//! Tesseract: synchronous stdout capture.

use std::path::Path;

use async_trait::async_trait;
use orgocr_core::{BackendKind, OcrEngine, OcrError, OcrSettings};

use crate::command::Invocation;

/// OCR engine wrapping the `tesseract` CLI tool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    pub command: String,
    pub language: String,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub fn from_settings(settings: &OcrSettings) -> Self {
        Self::new(&settings.tesseract_command, &settings.language)
    }

    /// `tesseract <image> stdout -l <lang>`
    pub fn invocation(&self, image: &Path) -> Invocation {
        Invocation::new(&self.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Tesseract
    }

    async fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let output = self.invocation(image).run(self.kind()).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn fake_engine(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-tesseract");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn captures_stdout_verbatim() {
        let tmp = tempfile::TempDir::new().unwrap();
        let args_file = tmp.path().join("args.txt");
        let cmd = fake_engine(
            tmp.path(),
            &format!("echo \"$@\" > '{}'\nprintf 'Sample Text\\n'", args_file.display()),
        );
        let image = tmp.path().join("shot 1.png");
        std::fs::write(&image, b"png").unwrap();

        let engine = TesseractEngine::new(cmd, "eng");
        let text = engine.recognize(&image).await.unwrap();

        assert_eq!(text, "Sample Text\n");
        let args = std::fs::read_to_string(&args_file).unwrap();
        assert_eq!(args.trim_end(), format!("{} stdout -l eng", image.display()));
    }

    #[tokio::test]
    async fn no_text_is_empty_string() {
        let tmp = tempfile::TempDir::new().unwrap();
        let engine = TesseractEngine::new(fake_engine(tmp.path(), "exit 0"), "eng");
        assert_eq!(engine.recognize(&tmp.path().join("x.png")).await.unwrap(), "");
    }

    #[tokio::test]
    async fn failing_engine_is_reported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let engine = TesseractEngine::new(
            fake_engine(tmp.path(), "echo 'Error opening data file' >&2\nexit 1"),
            "xyz",
        );
        let err = engine.recognize(&tmp.path().join("x.png")).await.unwrap_err();
        assert!(matches!(err, OcrError::EngineFailed { backend: BackendKind::Tesseract, .. }));
        assert!(err.to_string().contains("Error opening data file"));
    }
}
