//! EasyOCR: file-output backend.
//!
//! EasyOCR is a Python library, so it is driven through a helper script taking
//! `IMAGE OUTPUT`. The configured command is looked up on `PATH`; when it is
//! missing, the bundled script is provisioned into the script directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use orgocr_core::{BackendKind, OcrEngine, OcrError, OcrSettings};
use tracing::{debug, info};

use crate::command::Invocation;
use crate::provision::ensure_script_installed;

/// The helper script provisioned when no easyocr command is found.
pub const EASYOCR_SCRIPT: &str = include_str!("../scripts/orgocr-easyocr.py");

#[derive(Debug, Clone)]
pub struct EasyOcrEngine {
    pub command: String,
    pub env: Option<String>,
    pub env_runner: String,
    pub script_dir: PathBuf,
    pub script_contents: String,
    /// Where scoped output files are created; the system temp dir when unset.
    pub output_dir: Option<PathBuf>,
}

impl EasyOcrEngine {
    pub fn from_settings(settings: &OcrSettings) -> Self {
        Self {
            command: settings.easyocr_command.clone(),
            env: settings.easyocr_env.clone(),
            env_runner: settings.env_runner.clone(),
            script_dir: settings.script_dir.clone(),
            script_contents: EASYOCR_SCRIPT.to_string(),
            output_dir: None,
        }
    }

    pub fn with_script_contents(mut self, contents: impl Into<String>) -> Self {
        self.script_contents = contents.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Resolve the command to run: an explicit path is used as-is, a bare
    /// name is searched on `PATH`, and otherwise the helper is provisioned.
    pub async fn resolve_command(&self) -> Result<PathBuf, OcrError> {
        let command = Path::new(&self.command);
        if command.components().count() > 1 {
            return Ok(command.to_path_buf());
        }

        match which::which(&self.command) {
            Ok(found) => {
                debug!(path = %found.display(), "Found easyocr command on PATH");
                Ok(found)
            }
            Err(_) => {
                info!(
                    command = %self.command,
                    dir = %self.script_dir.display(),
                    "easyocr command not on PATH; provisioning helper script"
                );
                ensure_script_installed(&self.command, &self.script_dir, &self.script_contents)
                    .await
            }
        }
    }

    pub fn invocation(&self, command: &Path, image: &Path, output: &Path) -> Invocation {
        let inv = Invocation::new(command).arg(image).arg(output);
        match &self.env {
            Some(env) => inv.in_env(&self.env_runner, env),
            None => inv,
        }
    }

    fn output_file(&self) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("orgocr-").suffix(".txt");
        match &self.output_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

#[async_trait]
impl OcrEngine for EasyOcrEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::EasyOcr
    }

    async fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let command = self.resolve_command().await?;

        // Removed when dropped, whichever way this function returns.
        let output = self.output_file()?;
        self.invocation(&command, image, output.path())
            .run(self.kind())
            .await?;

        let text = tokio::fs::read_to_string(output.path()).await?;
        Ok(text)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn missing_command() -> String {
        format!("orgocr-test-missing-{}", uuid::Uuid::new_v4())
    }

    fn engine(tmp: &Path, command: String, script: &str) -> EasyOcrEngine {
        let out_dir = tmp.join("out");
        std::fs::create_dir_all(&out_dir).unwrap();
        let settings = OcrSettings {
            backend: "easyocr".into(),
            easyocr_command: command,
            script_dir: tmp.join("bin"),
            ..Default::default()
        };
        EasyOcrEngine::from_settings(&settings)
            .with_script_contents(script)
            .with_output_dir(out_dir)
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn bundled_script_takes_image_and_output() {
        assert!(EASYOCR_SCRIPT.starts_with("#!/usr/bin/env python3"));
        assert!(EASYOCR_SCRIPT.contains("readtext(image, detail=0)"));
        assert!(EASYOCR_SCRIPT.contains("redirect_stderr"));
    }

    #[tokio::test]
    async fn provisions_missing_command_then_uses_it() {
        let tmp = tempfile::TempDir::new().unwrap();
        let command = missing_command();
        let engine = engine(
            tmp.path(),
            command.clone(),
            "#!/bin/sh\nprintf 'line one\\nline two\\n' > \"$2\"\n",
        );

        let text = engine.recognize(&tmp.path().join("img.png")).await.unwrap();
        assert_eq!(text, "line one\nline two\n");

        let script = tmp.path().join("bin").join(&command);
        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o755, 0o755);
        assert_eq!(engine.resolve_command().await.unwrap(), script);
        assert!(dir_is_empty(&tmp.path().join("out")));
    }

    #[tokio::test]
    async fn output_file_removed_when_engine_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let engine = engine(tmp.path(), missing_command(), "#!/bin/sh\necho oops >&2\nexit 2\n");

        let err = engine.recognize(&tmp.path().join("img.png")).await.unwrap_err();
        assert!(matches!(err, OcrError::EngineFailed { backend: BackendKind::EasyOcr, .. }));
        assert!(dir_is_empty(&tmp.path().join("out")));
    }

    #[tokio::test]
    async fn runs_inside_configured_env() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = tmp.path().join("runner");
        let runner_args = tmp.path().join("runner-args.txt");
        std::fs::write(
            &runner,
            format!(
                "#!/bin/sh\necho \"$@\" > '{}'\nshift 3\nexec \"$@\"\n",
                runner_args.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&runner, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut engine = engine(tmp.path(), missing_command(), "#!/bin/sh\necho hi > \"$2\"\n");
        engine.env = Some("ocr-env".into());
        engine.env_runner = runner.to_string_lossy().into_owned();

        let text = engine.recognize(&tmp.path().join("img.png")).await.unwrap();
        assert_eq!(text, "hi\n");
        let recorded = std::fs::read_to_string(&runner_args).unwrap();
        assert!(recorded.starts_with("run -n ocr-env "), "{recorded}");
    }

    #[tokio::test]
    async fn explicit_path_is_never_provisioned() {
        let tmp = tempfile::TempDir::new().unwrap();
        let explicit = tmp.path().join("custom").join("easyocr-wrapper");
        let engine = engine(tmp.path(), explicit.to_string_lossy().into_owned(), "unused");

        assert_eq!(engine.resolve_command().await.unwrap(), explicit);
        assert!(!tmp.path().join("bin").exists());
    }
}
