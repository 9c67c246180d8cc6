//! Structured process invocation.
//!
//! Engines never go through a shell: an invocation is an executable plus an
//! argument list, so image paths with spaces or quotes are passed verbatim.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::{Output, Stdio};

use orgocr_core::{BackendKind, OcrError};
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Prefix the invocation with `<runner> run -n <env>` so it runs inside
    /// the named runtime environment.
    pub fn in_env(self, runner: &str, env: &str) -> Self {
        let mut args = vec![
            OsString::from("run"),
            OsString::from("-n"),
            OsString::from(env),
            self.program,
        ];
        args.extend(self.args);
        Self {
            program: OsString::from(runner),
            args,
        }
    }

    /// Run to completion, capturing stdout and stderr.
    ///
    /// A process that cannot be started or exits non-zero is reported as
    /// `OcrError::EngineFailed`.
    pub async fn run(&self, backend: BackendKind) -> Result<Output, OcrError> {
        debug!(backend = %backend, command = %self, "Running OCR engine");
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| OcrError::EngineFailed {
                backend,
                status: "not started".to_string(),
                stderr: format!("{}: {e}", self.program.to_string_lossy()),
            })?;

        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                backend,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {:?}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wrapping_prefixes_runner() {
        let inv = Invocation::new("orgocr-easyocr")
            .arg("/tmp/a b.png")
            .arg("/tmp/out.txt")
            .in_env("conda", "ocr");
        assert_eq!(inv.program, OsString::from("conda"));
        let args: Vec<_> = inv.args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            ["run", "-n", "ocr", "orgocr-easyocr", "/tmp/a b.png", "/tmp/out.txt"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn arguments_are_not_shell_interpreted() {
        let inv = Invocation::new("echo").arg("$(touch /nonexistent); `x` 'q'");
        let out = inv.run(BackendKind::Tesseract).await.unwrap();
        assert_eq!(
            String::from_utf8_lossy(&out.stdout),
            "$(touch /nonexistent); `x` 'q'\n"
        );
    }

    #[tokio::test]
    async fn missing_program_is_engine_failure() {
        let err = Invocation::new("orgocr-definitely-not-installed")
            .run(BackendKind::EasyOcr)
            .await
            .unwrap_err();
        match err {
            OcrError::EngineFailed { backend, status, .. } => {
                assert_eq!(backend, BackendKind::EasyOcr);
                assert_eq!(status, "not started");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let err = Invocation::new("sh")
            .arg("-c")
            .arg("echo broken >&2; exit 3")
            .run(BackendKind::Tesseract)
            .await
            .unwrap_err();
        match err {
            OcrError::EngineFailed { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
